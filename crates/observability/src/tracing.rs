//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Output shape for process logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line, for shipping to a collector.
    Json,
    /// Compact human-readable lines, for local runs and tests.
    Compact,
}

/// Initialize tracing/logging for the process with JSON output.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with_format(LogFormat::Json);
}

/// Initialize tracing/logging with an explicit output shape.
///
/// The filter comes from `RUST_LOG`, defaulting to `info` for this workspace.
pub fn init_with_format(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
}
