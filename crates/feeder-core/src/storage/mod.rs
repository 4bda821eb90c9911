use crate::model::{AggregateResult, Portrait, PortraitEntry};
use chrono::{DateTime, Utc};

pub mod schema;
pub mod store;

pub use store::Store;

/// Keyed access to leaderboard rows and cached portraits. Writes are
/// last-write-wins; implementations decide how concurrent callers serialise.
pub trait CharacterStore: Send + Sync {
    fn get_result(&self, character_id: i64) -> anyhow::Result<Option<AggregateResult>>;

    /// Insert-or-replace keyed by `character_id`.
    fn upsert_result(&self, result: &AggregateResult) -> anyhow::Result<()>;

    /// Highest `total_value` first.
    fn leaderboard(&self, limit: u32) -> anyhow::Result<Vec<AggregateResult>>;

    fn get_portrait(&self, character_id: i64) -> anyhow::Result<Option<PortraitEntry>>;

    fn put_portrait(
        &self,
        character_id: i64,
        portrait: &Portrait,
        fetched_at: DateTime<Utc>,
    ) -> anyhow::Result<()>;
}
