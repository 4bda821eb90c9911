use super::{exit_codes, load_config, open_store};
use crate::cli::args::PortraitArgs;
use feeder_core::engine::PortraitCache;
use feeder_core::providers::images::EveImageClient;
use std::sync::Arc;

pub async fn run(args: PortraitArgs) -> anyhow::Result<i32> {
    let cfg = load_config(&args.common)?;
    let store = Arc::new(open_store(&args.common)?);
    let client = feeder_core::providers::http_client(&cfg)?;
    let source = Arc::new(EveImageClient::new(
        cfg.image_base_url.clone(),
        cfg.portrait_size,
        client,
    ));
    let cache = PortraitCache::new(store, source, &cfg);

    match cache.get_or_refresh(args.id).await {
        Ok(p) => {
            tokio::fs::write(&args.out, &p.bytes).await?;
            eprintln!(
                "wrote {} bytes ({}) to {}",
                p.bytes.len(),
                p.content_type,
                args.out.display()
            );
            Ok(exit_codes::OK)
        }
        Err(e) if e.is_unavailable() => {
            eprintln!("{e}");
            Ok(exit_codes::UNAVAILABLE)
        }
        Err(e) => Err(e.into()),
    }
}
