// ABOUTME: Tracing subscriber setup for the binary
// ABOUTME: RUST_LOG-driven filter defaulting to info, compact output

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();
}
