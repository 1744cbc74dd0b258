//! Tracing setup for embedding hosts

/// Initialize stdout logging with the `RUST_LOG` filter (defaults to info).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
