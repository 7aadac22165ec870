use tracing_subscriber::EnvFilter;

/// Default filter: warnings only, or debug output for this crate with --verbose
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,fate_sync=debug"
    } else {
        "warn"
    }
}

/// Install the stderr tracing subscriber. `RUST_LOG` takes precedence over
/// the --verbose default.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
