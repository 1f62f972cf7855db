//! `selectshop-infra` — repository abstraction and implementations.
//!
//! The rule layer talks to [`store::ProductStore`], [`store::FolderStore`]
//! and [`store::ProductFolderStore`]; what backs them (an in-memory map for
//! tests/dev, Postgres for real deployments) is this crate's concern.

pub mod store;

pub use store::{
    FolderStore, InMemoryStore, PostgresStore, ProductFolderStore, ProductStore, StoreError,
};
