use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "feeder",
    version,
    about = "Abyssal killmail leaderboard: process characters and manage cached portraits"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch a character's abyssal killmails and update the leaderboard
    Process(ProcessArgs),
    /// Print the top of the leaderboard
    Leaderboard(LeaderboardArgs),
    /// Write a character portrait to a file, refreshing the cache if needed
    Portrait(PortraitArgs),
    /// Resolve a character name to ids via ESI
    Search(SearchArgs),
    /// Write a sample config file
    Init(InitArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    #[arg(long, env = "DATABASE_PATH", default_value = "leaderboard.db")]
    pub db: PathBuf,

    #[arg(long, env = "FEEDER_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Clone)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    pub id: i64,

    #[arg(long)]
    pub name: String,

    /// Stop after this many feed pages even if pages are still full
    #[arg(long)]
    pub max_pages: Option<u32>,
}

#[derive(Parser, Clone)]
pub struct LeaderboardArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long, default_value_t = 50)]
    pub limit: u32,

    /// Output format: text | json
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(Parser, Clone)]
pub struct PortraitArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    pub id: i64,

    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Parser, Clone)]
pub struct SearchArgs {
    #[arg(long, env = "FEEDER_CONFIG")]
    pub config: Option<PathBuf>,

    pub name: String,
}

#[derive(Parser, Clone)]
pub struct InitArgs {
    #[arg(long, default_value = "feeder.yaml")]
    pub config: PathBuf,
}
