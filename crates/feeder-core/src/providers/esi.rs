use super::CharacterDirectory;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL};
use serde_json::json;

pub struct EsiClient {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl EsiClient {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post(&self, url: String, body: serde_json::Value) -> anyhow::Result<serde_json::Value> {
        let resp = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(ACCEPT_LANGUAGE, "en")
            .header(CACHE_CONTROL, "no-cache")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!("ESI returned {}: {}", status, error_text);
        }

        Ok(resp.json().await?)
    }
}

#[async_trait]
impl CharacterDirectory for EsiClient {
    async fn search(&self, name: &str) -> anyhow::Result<serde_json::Value> {
        let url = self.url("/universe/ids/?datasource=tranquility&language=en");
        self.post(url, json!([name])).await
    }

    async fn lookup(&self, character_id: i64) -> anyhow::Result<serde_json::Value> {
        let url = self.url("/universe/names/?datasource=tranquility");
        self.post(url, json!([character_id])).await
    }
}
