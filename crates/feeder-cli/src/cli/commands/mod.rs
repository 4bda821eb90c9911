use super::args::{Cli, Command, CommonArgs};
use feeder_core::config::{resolve_config, FeederConfig};
use feeder_core::storage::Store;

pub mod init;
pub mod leaderboard;
pub mod portrait;
pub mod process;
pub mod search;

pub mod exit_codes {
    pub const OK: i32 = 0;
    pub const UNAVAILABLE: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Process(args) => process::run(args).await,
        Command::Leaderboard(args) => leaderboard::run(args),
        Command::Portrait(args) => portrait::run(args).await,
        Command::Search(args) => search::run(args).await,
        Command::Init(args) => init::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

pub(crate) fn open_store(common: &CommonArgs) -> anyhow::Result<Store> {
    if let Some(parent) = common.db.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let store = Store::open(&common.db)?;
    store.init_schema()?;
    Ok(store)
}

pub(crate) fn load_config(common: &CommonArgs) -> anyhow::Result<FeederConfig> {
    Ok(resolve_config(common.config.as_deref())?)
}
