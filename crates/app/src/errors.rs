//! Error-to-response translation.
//!
//! The transport layer (whatever it is) receives a ready-made body with the
//! numeric status it should answer with; rule kinds must stay distinguishable
//! here, in particular a bad-input rejection never maps to the same status as
//! a missing entity.

use serde::Serialize;

use selectshop_core::DomainError;

/// Client-visible error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: &'static str,
    pub message: String,
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self {
                status: 400,
                error: "validation_error",
                message: msg.clone(),
            },
            DomainError::NotFound(msg) => Self {
                status: 404,
                error: "not_found",
                message: msg.clone(),
            },
            DomainError::Unauthorized => Self {
                status: 403,
                error: "unauthorized",
                message: "unauthorized".to_string(),
            },
            DomainError::Conflict(msg) => Self {
                status: 409,
                error: "conflict",
                message: msg.clone(),
            },
            DomainError::InvalidId(msg) => Self {
                status: 400,
                error: "invalid_id",
                message: msg.clone(),
            },
            DomainError::Store(_) => Self {
                status: 500,
                error: "internal_error",
                // The store detail stays in the logs, not in the body.
                message: "internal error".to_string(),
            },
        }
    }
}
