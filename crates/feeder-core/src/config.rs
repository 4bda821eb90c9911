use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PAGE_SIZE: usize = 200;
pub const DEFAULT_PORTRAIT_TTL_DAYS: i64 = 7;
/// One hundred years; anything longer is a typo, and huge values overflow `chrono::Duration`.
pub const MAX_PORTRAIT_TTL_DAYS: i64 = 36_500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeederConfig {
    pub feed_base_url: String,
    pub image_base_url: String,
    pub esi_base_url: String,
    pub user_agent: String,
    /// Full-page size; a shorter page ends pagination.
    pub page_size: usize,
    /// Hard cap on page requests per character. Unset means the feed decides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u32>,
    pub portrait_ttl_days: i64,
    pub portrait_size: u32,
    pub request_timeout_ms: u64,
    pub leaderboard_limit: u32,
}

impl Default for FeederConfig {
    fn default() -> Self {
        Self {
            feed_base_url: "https://zkillboard.com/api".to_string(),
            image_base_url: "https://images.evetech.net".to_string(),
            esi_base_url: "https://esi.evetech.net/latest".to_string(),
            user_agent: format!("abyssal-feeders/{}", env!("CARGO_PKG_VERSION")),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: None,
            portrait_ttl_days: DEFAULT_PORTRAIT_TTL_DAYS,
            portrait_size: 64,
            request_timeout_ms: 30_000,
            leaderboard_limit: 50,
        }
    }
}

impl FeederConfig {
    pub fn portrait_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.portrait_ttl_days.clamp(1, MAX_PORTRAIT_TTL_DAYS))
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_timeout_ms)
    }

    /// Applies `FEEDER_*` overrides on top of the current values.
    pub fn apply_env(mut self) -> Self {
        self.apply_env_with(|k| std::env::var(k).ok());
        self
    }

    fn apply_env_with(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(v) = get("FEEDER_FEED_BASE_URL") {
            self.feed_base_url = v;
        }
        if let Some(v) = get("FEEDER_IMAGE_BASE_URL") {
            self.image_base_url = v;
        }
        if let Some(v) = get("FEEDER_ESI_BASE_URL") {
            self.esi_base_url = v;
        }
        if let Some(v) = get("FEEDER_USER_AGENT") {
            self.user_agent = v;
        }
        if let Some(v) = get("FEEDER_MAX_PAGES") {
            if let Ok(n) = v.parse() {
                self.max_pages = Some(n);
            }
        }
        if let Some(v) = get("FEEDER_PORTRAIT_TTL_DAYS") {
            if let Ok(n) = v.parse() {
                self.portrait_ttl_days = n;
            }
        }
        if let Some(v) = get("FEEDER_REQUEST_TIMEOUT_MS") {
            if let Ok(n) = v.parse() {
                self.request_timeout_ms = n;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError("page_size must be greater than 0".into()));
        }
        if self.portrait_ttl_days <= 0 {
            return Err(ConfigError(
                "portrait_ttl_days must be greater than 0".into(),
            ));
        }
        if self.portrait_ttl_days > MAX_PORTRAIT_TTL_DAYS {
            return Err(ConfigError(format!(
                "portrait_ttl_days must be at most {MAX_PORTRAIT_TTL_DAYS}, got {}",
                self.portrait_ttl_days
            )));
        }
        if self.max_pages == Some(0) {
            return Err(ConfigError("max_pages must be greater than 0 when set".into()));
        }
        for (name, url) in [
            ("feed_base_url", &self.feed_base_url),
            ("image_base_url", &self.image_base_url),
            ("esi_base_url", &self.esi_base_url),
        ] {
            if url.trim().is_empty() {
                return Err(ConfigError(format!("{name} cannot be empty")));
            }
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<FeederConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;

    let mut ignored_keys = std::collections::BTreeSet::new();
    let deserializer = serde_yaml::Deserializer::from_str(&raw);

    let cfg: FeederConfig = serde_ignored::deserialize(deserializer, |path| {
        ignored_keys.insert(path.to_string());
    })
    .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;

    if !ignored_keys.is_empty() {
        tracing::warn!(
            event = "config.unknown_keys",
            path = %path.display(),
            keys = ?ignored_keys,
            "ignored unknown config fields"
        );
    }

    cfg.validate()?;
    Ok(cfg)
}

/// File config (when given) with env overrides applied last.
pub fn resolve_config(path: Option<&Path>) -> Result<FeederConfig, ConfigError> {
    let cfg = match path {
        Some(p) => load_config(p)?,
        None => FeederConfig::default(),
    };
    let cfg = cfg.apply_env();
    cfg.validate()?;
    Ok(cfg)
}

pub fn write_sample_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(
        path,
        r#"# feeder configuration
feed_base_url: https://zkillboard.com/api
image_base_url: https://images.evetech.net
esi_base_url: https://esi.evetech.net/latest
user_agent: "Abyssal Feeders - you@example.com"
page_size: 200
# max_pages: 500
portrait_ttl_days: 7
portrait_size: 64
request_timeout_ms: 30000
leaderboard_limit: 50
"#,
    )
    .map_err(|e| ConfigError(format!("failed to write sample config: {}", e)))?;
    Ok(())
}
