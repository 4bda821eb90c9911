use crate::config::FeederConfig;
use crate::model::{EventRecord, Portrait};
use async_trait::async_trait;

/// One page of the killmail feed for a character. Pages are 1-based.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_page(&self, character_id: i64, page: u32) -> anyhow::Result<Vec<EventRecord>>;
    fn source_name(&self) -> &'static str;
}

#[async_trait]
pub trait PortraitSource: Send + Sync {
    async fn fetch_portrait(&self, character_id: i64) -> anyhow::Result<Portrait>;
}

/// Name <-> id resolution. Responses are passed through untouched.
#[async_trait]
pub trait CharacterDirectory: Send + Sync {
    async fn search(&self, name: &str) -> anyhow::Result<serde_json::Value>;
    async fn lookup(&self, character_id: i64) -> anyhow::Result<serde_json::Value>;
}

pub fn http_client(cfg: &FeederConfig) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(cfg.user_agent.clone())
        .timeout(cfg.request_timeout())
        .build()?;
    Ok(client)
}

pub mod esi;
pub mod fake;
pub mod images;
pub mod zkill;
