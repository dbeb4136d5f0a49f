use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to stderr.
///
/// `filter` is an `EnvFilter` directive such as `warn` or `simulado=debug`;
/// an invalid directive falls back to `warn`. Calling this twice is a no-op.
pub fn init(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
