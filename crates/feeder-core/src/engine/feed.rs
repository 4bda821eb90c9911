use crate::config::{FeederConfig, DEFAULT_PAGE_SIZE};
use crate::model::EventRecord;
use crate::providers::FeedSource;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// An empty page came back.
    Exhausted,
    /// A page shorter than the page size was taken as the last one.
    ShortPage,
    /// A page request failed; earlier pages are kept.
    TransportError,
    /// `max_pages` was reached while pages were still full.
    PageLimit,
}

impl StopReason {
    pub fn is_truncated(&self) -> bool {
        matches!(self, StopReason::TransportError | StopReason::PageLimit)
    }
}

#[derive(Debug, Clone)]
pub struct FeedFetch {
    pub records: Vec<EventRecord>,
    pub pages_requested: u32,
    pub stop: StopReason,
}

/// Walks the killmail feed one page at a time until a short or empty page,
/// a failed request, or the optional page budget.
#[derive(Clone)]
pub struct FeedFetcher {
    pub source: Arc<dyn FeedSource>,
    pub page_size: usize,
    pub max_pages: Option<u32>,
}

impl FeedFetcher {
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        Self {
            source,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: None,
        }
    }

    pub fn from_config(source: Arc<dyn FeedSource>, cfg: &FeederConfig) -> Self {
        Self {
            source,
            page_size: cfg.page_size.max(1),
            max_pages: cfg.max_pages,
        }
    }

    pub async fn fetch_all(&self, character_id: i64) -> Vec<EventRecord> {
        self.fetch(character_id).await.records
    }

    pub async fn fetch(&self, character_id: i64) -> FeedFetch {
        let mut records = Vec::new();
        let mut page: u32 = 1;

        let stop = loop {
            if let Some(max) = self.max_pages {
                if page > max {
                    tracing::warn!(
                        event = "feed.page_limit",
                        character_id,
                        max_pages = max,
                        collected = records.len(),
                        "page budget reached, result truncated"
                    );
                    break StopReason::PageLimit;
                }
            }

            let batch = match self.source.fetch_page(character_id, page).await {
                Ok(batch) => batch,
                Err(e) => {
                    tracing::warn!(
                        event = "feed.page_failed",
                        source = self.source.source_name(),
                        character_id,
                        page,
                        collected = records.len(),
                        error = %e,
                        "stopping pagination"
                    );
                    break StopReason::TransportError;
                }
            };

            tracing::debug!(
                event = "feed.page_fetched",
                character_id,
                page,
                records = batch.len()
            );

            if batch.is_empty() {
                break StopReason::Exhausted;
            }

            let short = batch.len() < self.page_size;
            records.extend(batch);
            if short {
                break StopReason::ShortPage;
            }
            page += 1;
        };

        let pages_requested = match stop {
            StopReason::PageLimit => page - 1,
            _ => page,
        };

        FeedFetch {
            records,
            pages_requested,
            stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::fake::{killmail, PageScript, ScriptedFeed};

    #[tokio::test]
    async fn empty_first_page_stops_after_one_request() {
        let feed = Arc::new(ScriptedFeed::new(vec![PageScript::Records(vec![])]));
        let fetcher = FeedFetcher::new(feed.clone());

        let out = fetcher.fetch(1).await;
        assert!(out.records.is_empty());
        assert_eq!(out.stop, StopReason::Exhausted);
        assert_eq!(out.pages_requested, 1);
        assert_eq!(feed.request_count(), 1);
    }

    #[tokio::test]
    async fn short_page_ends_pagination() {
        let feed = Arc::new(ScriptedFeed::with_page_sizes(&[200, 200, 50], 1.0));
        let fetcher = FeedFetcher::new(feed.clone());

        let out = fetcher.fetch(1).await;
        assert_eq!(out.records.len(), 450);
        assert_eq!(out.stop, StopReason::ShortPage);
        assert_eq!(feed.requested_pages(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn full_pages_then_empty_page_is_exhausted() {
        let feed = Arc::new(ScriptedFeed::with_page_sizes(&[200, 200], 1.0));
        let fetcher = FeedFetcher::new(feed.clone());

        let out = fetcher.fetch(1).await;
        assert_eq!(out.records.len(), 400);
        assert_eq!(out.stop, StopReason::Exhausted);
        assert_eq!(feed.request_count(), 3);
    }

    #[tokio::test]
    async fn failure_keeps_earlier_pages() {
        let full = ScriptedFeed::with_page_sizes(&[200], 1.0);
        let first = match full.fetch_page(1, 1).await {
            Ok(r) => r,
            Err(e) => panic!("scripted page failed: {e}"),
        };
        let feed = Arc::new(ScriptedFeed::new(vec![
            PageScript::Records(first),
            PageScript::Fail("503 Service Unavailable".into()),
            PageScript::Records(vec![killmail(999, 5.0)]),
        ]));
        let fetcher = FeedFetcher::new(feed.clone());

        let out = fetcher.fetch(1).await;
        assert_eq!(out.records.len(), 200);
        assert_eq!(out.stop, StopReason::TransportError);
        assert!(out.stop.is_truncated());
        assert_eq!(feed.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn page_budget_bounds_an_endless_feed() {
        let page: Vec<_> = (0..10).map(|i| killmail(i, 1.0)).collect();
        let feed = Arc::new(ScriptedFeed::endless(page));
        let fetcher = FeedFetcher {
            source: feed.clone(),
            page_size: 10,
            max_pages: Some(4),
        };

        let out = fetcher.fetch(1).await;
        assert_eq!(out.records.len(), 40);
        assert_eq!(out.stop, StopReason::PageLimit);
        assert_eq!(out.pages_requested, 4);
        assert_eq!(feed.request_count(), 4);
    }

    #[tokio::test]
    async fn short_page_on_budget_boundary_is_not_truncation() {
        let feed = Arc::new(ScriptedFeed::with_page_sizes(&[10, 3], 1.0));
        let fetcher = FeedFetcher {
            source: feed.clone(),
            page_size: 10,
            max_pages: Some(2),
        };

        let out = fetcher.fetch(1).await;
        assert_eq!(out.records.len(), 13);
        assert_eq!(out.stop, StopReason::ShortPage);
    }
}
