//! User actor record.

use serde::{Deserialize, Serialize};

use selectshop_core::{Entity, UserId};

use crate::Role;

/// A resolved actor: who is asking, and with which role.
///
/// Owns zero or more products and folders; ownership checks compare this id
/// against the owner id recorded on the entity, through the entity's own
/// `is_owned_by` predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            role,
        }
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
