//! Tracing initialization

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
///
/// Filter comes from `RUST_LOG`, defaulting to `info`. Safe to call once
/// per process; embedding applications that install their own subscriber
/// should skip this.
///
/// # Errors
/// Fails when a global subscriber is already installed.
pub fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
