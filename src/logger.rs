use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber; diagnostics go to stderr, `RUST_LOG` overrides the level
pub fn initialize_logger() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("codebundle=warn"));

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: Failed to set global logger: {}", e);
    }
}
