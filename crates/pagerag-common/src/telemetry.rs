use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber. Call once at process start.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
}
