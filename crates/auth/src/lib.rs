//! `selectshop-auth` — actor identity and roles.
//!
//! Authentication/session mechanics live outside this system; the surrounding
//! layer hands the rule layer an already-resolved [`User`].

pub mod role;
pub mod user;

pub use role::Role;
pub use user::User;
