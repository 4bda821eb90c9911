use super::exit_codes;
use crate::cli::args::SearchArgs;
use feeder_core::config::resolve_config;
use feeder_core::providers::esi::EsiClient;
use feeder_core::providers::CharacterDirectory;

pub async fn run(args: SearchArgs) -> anyhow::Result<i32> {
    let cfg = resolve_config(args.config.as_deref())?;
    let client = feeder_core::providers::http_client(&cfg)?;
    let esi = EsiClient::new(cfg.esi_base_url.clone(), client);

    let found = esi.search(&args.name).await?;
    println!("{}", serde_json::to_string_pretty(&found)?);
    Ok(exit_codes::OK)
}
