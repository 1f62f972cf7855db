//! `selectshop-observability` — tracing/logging initialization.

pub mod tracing;

pub use self::tracing::{LogFormat, init, init_with_format};
