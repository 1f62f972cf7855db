//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business/domain failures. Every rule
/// violation is raised at the point of detection; nothing is retried here.
/// The boundary layer translates these kinds into client-visible statuses,
/// so `Validation` and `NotFound` must stay distinct.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Caller-supplied input violates a business rule (price below floor,
    /// duplicate association, ownership mismatch). Carries the user-facing,
    /// already-localized message.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced entity (product/folder) does not exist. Carries the
    /// user-facing message; uniformly raised at every lookup site, never a
    /// propagated null.
    #[error("not found: {0}")]
    NotFound(String),

    /// The requesting user is not allowed to act on the referenced entity.
    #[error("unauthorized")]
    Unauthorized,

    /// A conflicting record already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The backing store failed; not a rule violation.
    #[error("store failure: {0}")]
    Store(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// True for kinds the caller can recover from by correcting input.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DomainError::Store(_))
    }
}
