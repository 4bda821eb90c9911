use super::PortraitSource;
use crate::model::Portrait;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

/// Used when the image service omits `content-type`.
pub const FALLBACK_CONTENT_TYPE: &str = "image/jpeg";

pub struct EveImageClient {
    pub base_url: String,
    pub size: u32,
    pub client: reqwest::Client,
}

impl EveImageClient {
    pub fn new(base_url: impl Into<String>, size: u32, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            size,
            client,
        }
    }

    pub fn portrait_url(&self, character_id: i64) -> String {
        format!(
            "{}/characters/{}/portrait?tenant=tranquility&size={}",
            self.base_url.trim_end_matches('/'),
            character_id,
            self.size
        )
    }
}

#[async_trait]
impl PortraitSource for EveImageClient {
    async fn fetch_portrait(&self, character_id: i64) -> anyhow::Result<Portrait> {
        let resp = self.client.get(self.portrait_url(character_id)).send().await?;

        if !resp.status().is_success() {
            anyhow::bail!(
                "image service returned {} for character {}",
                resp.status(),
                character_id
            );
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();

        let bytes = resp.bytes().await?;
        if bytes.is_empty() {
            anyhow::bail!("image service returned an empty body for character {}", character_id);
        }

        Ok(Portrait::new(bytes.to_vec(), content_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portrait_url_carries_size_and_tenant() {
        let c = EveImageClient::new("https://images.evetech.net", 64, reqwest::Client::new());
        assert_eq!(
            c.portrait_url(90000001),
            "https://images.evetech.net/characters/90000001/portrait?tenant=tranquility&size=64"
        );
    }
}
