use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// JSON pointer to the ISK value zKillboard attaches to every killmail.
pub const TOTAL_VALUE_POINTER: &str = "/zkb/totalValue";

/// One killmail as returned by the feed. Only `zkb.totalValue` is read; the
/// rest of the document is carried opaquely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventRecord(pub serde_json::Value);

impl EventRecord {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Numeric value at `pointer`, or `default` when any segment is missing,
    /// null, or not a usable non-negative number.
    pub fn numeric_or(&self, pointer: &str, default: f64) -> f64 {
        self.0
            .pointer(pointer)
            .and_then(serde_json::Value::as_f64)
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(default)
    }

    pub fn total_value(&self) -> f64 {
        self.numeric_or(TOTAL_VALUE_POINTER, 0.0)
    }

    pub fn killmail_id(&self) -> Option<i64> {
        self.0.get("killmail_id").and_then(serde_json::Value::as_i64)
    }
}

impl From<serde_json::Value> for EventRecord {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Persisted leaderboard row. One live row per character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub character_id: i64,
    pub character_name: String,
    pub total_value: u64,
    pub killmail_count: u64,
    pub last_updated: DateTime<Utc>,
}

/// What `process` reports back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOutcome {
    pub character_id: i64,
    pub character_name: String,
    pub total_value: u64,
    pub killmail_count: u64,
    pub images_cached: bool,
}

/// Image bytes plus the content type they were served with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portrait {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl Portrait {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }

    /// Strong validator for HTTP caching.
    pub fn etag(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        format!("\"{}\"", hex::encode(hasher.finalize()))
    }
}

/// Cached portrait row. `portrait` is `None` until the first successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortraitEntry {
    pub character_id: i64,
    pub portrait: Option<Portrait>,
    pub fetched_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    NoCache,
    Stale,
    Fresh,
}

impl PortraitEntry {
    pub fn empty(character_id: i64) -> Self {
        Self {
            character_id,
            portrait: None,
            fetched_at: None,
        }
    }

    /// An entry exactly `ttl` old is already stale.
    pub fn freshness(&self, now: DateTime<Utc>, ttl: Duration) -> Freshness {
        if self.portrait.is_none() {
            return Freshness::NoCache;
        }
        match self.fetched_at {
            Some(at) if now - at < ttl => Freshness::Fresh,
            _ => Freshness::Stale,
        }
    }
}
