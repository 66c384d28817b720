use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,budget_api=debug";

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the default filter.
/// Logs go to stderr so `parse` output on stdout stays clean.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
