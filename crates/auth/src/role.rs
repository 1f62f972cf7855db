//! Role model for visibility decisions.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use selectshop_core::DomainError;

/// Actor role.
///
/// The variant set is closed on purpose: listing visibility is decided by an
/// explicit `match` on the role at the query boundary, so a new role must be
/// wired through every dispatch site before it compiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Plain user: sees and manages only their own products and folders.
    User,
    /// Elevated role: listing queries see every product system-wide.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}
