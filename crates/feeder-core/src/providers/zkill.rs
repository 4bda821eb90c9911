use super::FeedSource;
use crate::model::EventRecord;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_ENCODING};

pub struct ZkillClient {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl ZkillClient {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn page_url(&self, character_id: i64, page: u32) -> String {
        format!(
            "{}/characterID/{}/abyssal/page/{}/",
            self.base_url.trim_end_matches('/'),
            character_id,
            page
        )
    }
}

#[async_trait]
impl FeedSource for ZkillClient {
    async fn fetch_page(&self, character_id: i64, page: u32) -> anyhow::Result<Vec<EventRecord>> {
        let url = self.page_url(character_id, page);
        tracing::debug!(event = "feed.request", %url, page);

        let resp = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(ACCEPT_ENCODING, "gzip")
            .send()
            .await?;

        if !resp.status().is_success() {
            anyhow::bail!("zkillboard returned {} for page {}", resp.status(), page);
        }

        let records: Vec<EventRecord> = resp.json().await?;
        Ok(records)
    }

    fn source_name(&self) -> &'static str {
        "zkillboard"
    }
}
