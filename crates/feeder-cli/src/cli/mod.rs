pub mod args;
pub mod commands;

use tracing_subscriber::{fmt, EnvFilter};

/// JSON logs on stderr; stdout stays reserved for command output.
pub fn init_logging() {
    let level = std::env::var("FEEDER_LOG").unwrap_or_else(|_| "warn".to_string());
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
