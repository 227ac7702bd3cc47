/// Installs the global subscriber. All actors and spans use this configuration.
///
/// **Usage:**
/// ```bash
/// RUST_LOG=debug cargo run    # Show debug logs, including order payloads
/// RUST_LOG=info cargo run     # Show info logs only
/// RUST_LOG=print_orders::flows=debug cargo run
/// ```
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
