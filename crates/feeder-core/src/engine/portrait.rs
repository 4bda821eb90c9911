use crate::config::FeederConfig;
use crate::errors::PortraitError;
use crate::model::{Freshness, Portrait, PortraitEntry};
use crate::providers::PortraitSource;
use crate::storage::CharacterStore;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Read-through cache for character portraits.
///
/// A fresh entry is served without touching the network. Stale or missing
/// entries trigger one fetch; if that fetch fails, stale bytes are served
/// unchanged and only a character that was never cached yields
/// [`PortraitError::Unavailable`].
#[derive(Clone)]
pub struct PortraitCache {
    pub store: Arc<dyn CharacterStore>,
    pub source: Arc<dyn PortraitSource>,
    pub ttl: Duration,
}

impl PortraitCache {
    pub fn new(
        store: Arc<dyn CharacterStore>,
        source: Arc<dyn PortraitSource>,
        cfg: &FeederConfig,
    ) -> Self {
        Self {
            store,
            source,
            ttl: cfg.portrait_ttl(),
        }
    }

    pub async fn get_or_refresh(&self, character_id: i64) -> Result<Portrait, PortraitError> {
        self.get_or_refresh_at(character_id, Utc::now()).await
    }

    pub async fn get_or_refresh_at(
        &self,
        character_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Portrait, PortraitError> {
        let entry = self
            .store
            .get_portrait(character_id)
            .map_err(PortraitError::Store)?
            .unwrap_or_else(|| PortraitEntry::empty(character_id));

        let state = entry.freshness(now, self.ttl);
        if state == Freshness::Fresh {
            if let Some(p) = entry.portrait {
                return Ok(p);
            }
        }

        match self.source.fetch_portrait(character_id).await {
            Ok(fetched) => {
                self.store
                    .put_portrait(character_id, &fetched, now)
                    .map_err(PortraitError::Store)?;
                tracing::info!(
                    event = "portrait.refreshed",
                    character_id,
                    previous = ?state,
                    bytes = fetched.bytes.len(),
                    content_type = %fetched.content_type
                );
                Ok(fetched)
            }
            Err(e) => match entry.portrait {
                Some(stale) => {
                    tracing::warn!(
                        event = "portrait.stale_fallback",
                        character_id,
                        fetched_at = ?entry.fetched_at,
                        error = %e,
                        "serving stale portrait"
                    );
                    Ok(stale)
                }
                None => {
                    tracing::warn!(
                        event = "portrait.unavailable",
                        character_id,
                        error = %e
                    );
                    Err(PortraitError::Unavailable {
                        subject_id: character_id,
                    })
                }
            },
        }
    }
}
