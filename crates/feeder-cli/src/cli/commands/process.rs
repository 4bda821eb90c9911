use super::{exit_codes, load_config, open_store};
use crate::cli::args::ProcessArgs;
use feeder_core::engine::Processor;
use std::sync::Arc;

pub async fn run(args: ProcessArgs) -> anyhow::Result<i32> {
    let mut cfg = load_config(&args.common)?;
    if args.max_pages.is_some() {
        cfg.max_pages = args.max_pages;
    }
    cfg.validate()?;

    let store = Arc::new(open_store(&args.common)?);
    tracing::info!(
        event = "cli.process",
        character_id = args.id,
        db = %args.common.db.display(),
        max_pages = ?cfg.max_pages
    );
    let processor = Processor::from_config(store, &cfg)?;
    let outcome = processor.process(args.id, &args.name).await?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(exit_codes::OK)
}
