/// Configures the global tracing subscriber once for the whole process.
///
/// `RUST_LOG` takes precedence; otherwise `default_filter` (from settings) is used.
///
/// ```bash
/// RUST_LOG=debug courier-orders
/// RUST_LOG=courier_orders::actor_framework=debug,info courier-orders
/// ```
pub fn setup_tracing(default_filter: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
