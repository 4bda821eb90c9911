use crate::config::ServerConfig;
use crate::routes;
use axum::Router;
use feeder_core::config::{resolve_config, FeederConfig};
use feeder_core::engine::{PortraitCache, Processor};
use feeder_core::providers::esi::EsiClient;
use feeder_core::providers::CharacterDirectory;
use feeder_core::storage::{CharacterStore, Store};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CharacterStore>,
    pub processor: Arc<Processor>,
    pub portraits: PortraitCache,
    pub directory: Arc<dyn CharacterDirectory>,
    pub leaderboard_limit: u32,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CharacterStore>,
        processor: Processor,
        directory: Arc<dyn CharacterDirectory>,
        leaderboard_limit: u32,
    ) -> Self {
        let portraits = processor.portraits.clone();
        Self {
            store,
            processor: Arc::new(processor),
            portraits,
            directory,
            leaderboard_limit,
        }
    }

    /// Live clients against the configured upstreams.
    pub fn from_config(store: Arc<Store>, cfg: &FeederConfig) -> anyhow::Result<Self> {
        let processor = Processor::from_config(store.clone(), cfg)?;
        let client = feeder_core::providers::http_client(cfg)?;
        let directory = Arc::new(EsiClient::new(cfg.esi_base_url.clone(), client));
        Ok(Self::new(store, processor, directory, cfg.leaderboard_limit))
    }
}

pub fn app(state: AppState) -> Router {
    routes::router()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub struct Server;

impl Server {
    pub async fn run(cfg: ServerConfig) -> anyhow::Result<()> {
        let feeder_cfg = resolve_config(cfg.config_path.as_deref())?;

        let store = Store::open(&cfg.database_path)?;
        store.init_schema()?;
        tracing::info!(
            event = "db_ready",
            path = %cfg.database_path.display()
        );

        let state = AppState::from_config(Arc::new(store), &feeder_cfg)?;
        let listener = tokio::net::TcpListener::bind(cfg.bind).await?;
        tracing::info!(event = "listening", addr = %listener.local_addr()?);

        axum::serve(listener, app(state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!(event = "server_stop");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(event = "signal_error", error = %e);
    }
}
