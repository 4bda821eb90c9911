use super::{FeedFetcher, PortraitCache, ValueAggregator};
use crate::config::FeederConfig;
use crate::model::{AggregateResult, ProcessOutcome};
use crate::providers::images::EveImageClient;
use crate::providers::zkill::ZkillClient;
use crate::storage::CharacterStore;
use chrono::Utc;
use std::sync::Arc;

/// Fetch, total, refresh portrait, persist. Only persistence can fail the run.
#[derive(Clone)]
pub struct Processor {
    pub store: Arc<dyn CharacterStore>,
    pub feed: FeedFetcher,
    pub aggregator: ValueAggregator,
    pub portraits: PortraitCache,
}

impl Processor {
    pub fn new(store: Arc<dyn CharacterStore>, feed: FeedFetcher, portraits: PortraitCache) -> Self {
        Self {
            store,
            feed,
            aggregator: ValueAggregator::default(),
            portraits,
        }
    }

    /// Wires the live zKillboard and image-service clients.
    pub fn from_config(store: Arc<dyn CharacterStore>, cfg: &FeederConfig) -> anyhow::Result<Self> {
        let client = crate::providers::http_client(cfg)?;
        let feed = Arc::new(ZkillClient::new(cfg.feed_base_url.clone(), client.clone()));
        let images = Arc::new(EveImageClient::new(
            cfg.image_base_url.clone(),
            cfg.portrait_size,
            client,
        ));
        Ok(Self::new(
            store.clone(),
            FeedFetcher::from_config(feed, cfg),
            PortraitCache::new(store, images, cfg),
        ))
    }

    pub async fn process(
        &self,
        character_id: i64,
        character_name: &str,
    ) -> anyhow::Result<ProcessOutcome> {
        let fetched = self.feed.fetch(character_id).await;
        let total_value = self.aggregator.aggregate(&fetched.records);
        let killmail_count = fetched.records.len() as u64;

        let images_cached = match self.portraits.get_or_refresh(character_id).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    event = "process.portrait_skipped",
                    character_id,
                    error = %e
                );
                false
            }
        };

        self.store.upsert_result(&AggregateResult {
            character_id,
            character_name: character_name.to_string(),
            total_value,
            killmail_count,
            last_updated: Utc::now(),
        })?;

        tracing::info!(
            event = "process.completed",
            character_id,
            total_value,
            killmail_count,
            pages = fetched.pages_requested,
            stop = ?fetched.stop,
            images_cached
        );

        Ok(ProcessOutcome {
            character_id,
            character_name: character_name.to_string(),
            total_value,
            killmail_count,
            images_cached,
        })
    }
}
