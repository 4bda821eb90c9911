use anyhow::Result;
use clap::Parser;
use feeder_server::config;
use feeder_server::server::Server;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML config with upstream URLs and feed limits
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides DATABASE_PATH)
    #[arg(long)]
    db: Option<PathBuf>,
}

use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut cfg = config::ServerConfig::from_env();
    if let Some(path) = args.config {
        cfg.config_path = Some(path);
    }
    if let Some(db) = args.db {
        cfg.database_path = db;
    }

    init_logging(&cfg.log_level);

    tracing::info!(event = "server_start", config = ?cfg);

    Server::run(cfg).await
}
