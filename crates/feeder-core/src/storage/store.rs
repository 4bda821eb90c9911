use super::CharacterStore;
use crate::model::{AggregateResult, Portrait, PortraitEntry};
use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub struct Store {
    pub conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open sqlite db {}", path.display()))?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory sqlite db")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn init_schema(&self) -> anyhow::Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(super::schema::DDL)?;
        Ok(())
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("sqlite connection mutex poisoned"))
    }
}

fn ts(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_ts(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn row_to_result(row: &rusqlite::Row<'_>) -> rusqlite::Result<AggregateResult> {
    let total: i64 = row.get(2)?;
    let count: i64 = row.get(3)?;
    let updated: String = row.get(4)?;
    Ok(AggregateResult {
        character_id: row.get(0)?,
        character_name: row.get(1)?,
        total_value: u64::try_from(total).unwrap_or(0),
        killmail_count: u64::try_from(count).unwrap_or(0),
        last_updated: parse_ts(&updated).unwrap_or_default(),
    })
}

impl CharacterStore for Store {
    fn get_result(&self, character_id: i64) -> anyhow::Result<Option<AggregateResult>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT character_id, character_name, total_value, killmail_count, last_updated
                 FROM leaderboard WHERE character_id = ?1",
                params![character_id],
                row_to_result,
            )
            .optional()?;
        Ok(row)
    }

    fn upsert_result(&self, result: &AggregateResult) -> anyhow::Result<()> {
        let conn = self.lock()?;
        // SQLite INTEGER is signed; anything larger saturates.
        let total = i64::try_from(result.total_value).unwrap_or(i64::MAX);
        let count = i64::try_from(result.killmail_count).unwrap_or(i64::MAX);
        conn.execute(
            "INSERT INTO leaderboard (
                character_id, character_name, total_value, killmail_count, last_updated
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(character_id) DO UPDATE SET
                character_name=excluded.character_name,
                total_value=excluded.total_value,
                killmail_count=excluded.killmail_count,
                last_updated=excluded.last_updated",
            params![
                result.character_id,
                result.character_name,
                total,
                count,
                ts(result.last_updated)
            ],
        )
        .with_context(|| format!("failed to upsert character {}", result.character_id))?;
        Ok(())
    }

    fn leaderboard(&self, limit: u32) -> anyhow::Result<Vec<AggregateResult>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT character_id, character_name, total_value, killmail_count, last_updated
             FROM leaderboard
             ORDER BY total_value DESC, character_id ASC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], row_to_result)?;

        let mut results = Vec::new();
        for r in rows {
            results.push(r?);
        }
        Ok(results)
    }

    fn get_portrait(&self, character_id: i64) -> anyhow::Result<Option<PortraitEntry>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT image_data, image_content_type, image_fetched_at
                 FROM portraits WHERE character_id = ?1",
                params![character_id],
                |row| {
                    let data: Option<Vec<u8>> = row.get(0)?;
                    let content_type: Option<String> = row.get(1)?;
                    let fetched_at: Option<String> = row.get(2)?;
                    Ok((data, content_type, fetched_at))
                },
            )
            .optional()?;

        Ok(row.map(|(data, content_type, fetched_at)| {
            // bytes without a content type would violate the table CHECK; treat as never cached
            let portrait = match (data, content_type) {
                (Some(bytes), Some(ct)) => Some(Portrait::new(bytes, ct)),
                _ => None,
            };
            PortraitEntry {
                character_id,
                portrait,
                fetched_at: fetched_at.as_deref().and_then(parse_ts),
            }
        }))
    }

    fn put_portrait(
        &self,
        character_id: i64,
        portrait: &Portrait,
        fetched_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO portraits (
                character_id, image_data, image_content_type, image_fetched_at
            ) VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(character_id) DO UPDATE SET
                image_data=excluded.image_data,
                image_content_type=excluded.image_content_type,
                image_fetched_at=excluded.image_fetched_at",
            params![
                character_id,
                portrait.bytes,
                portrait.content_type,
                ts(fetched_at)
            ],
        )
        .with_context(|| format!("failed to cache portrait for character {}", character_id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn store() -> Store {
        let s = Store::memory().unwrap();
        s.init_schema().unwrap();
        s
    }

    fn result(id: i64, name: &str, total: u64) -> AggregateResult {
        AggregateResult {
            character_id: id,
            character_name: name.into(),
            total_value: total,
            killmail_count: 1,
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn upsert_replaces_previous_row() {
        let s = store();
        s.upsert_result(&result(1, "Alpha", 100)).unwrap();
        s.upsert_result(&result(1, "Alpha Prime", 40)).unwrap();

        let row = s.get_result(1).unwrap().unwrap();
        assert_eq!(row.character_name, "Alpha Prime");
        assert_eq!(row.total_value, 40);
        assert_eq!(s.leaderboard(50).unwrap().len(), 1);
    }

    #[test]
    fn leaderboard_orders_by_value_and_limits() {
        let s = store();
        s.upsert_result(&result(1, "Low", 10)).unwrap();
        s.upsert_result(&result(2, "High", 1_000)).unwrap();
        s.upsert_result(&result(3, "Mid", 500)).unwrap();

        let top: Vec<_> = s
            .leaderboard(2)
            .unwrap()
            .into_iter()
            .map(|r| r.character_name)
            .collect();
        assert_eq!(top, vec!["High", "Mid"]);
    }

    #[test]
    fn missing_rows_are_none() {
        let s = store();
        assert!(s.get_result(99).unwrap().is_none());
        assert!(s.get_portrait(99).unwrap().is_none());
    }

    #[test]
    fn portrait_round_trips_with_timestamp() {
        let s = store();
        let at = Utc::now() - Duration::days(3);
        let p = Portrait::new(vec![0xff, 0xd8, 0xff], "image/jpeg");
        s.put_portrait(5, &p, at).unwrap();

        let entry = s.get_portrait(5).unwrap().unwrap();
        assert_eq!(entry.portrait, Some(p));
        let stored = entry.fetched_at.unwrap();
        assert!((stored - at).num_milliseconds().abs() <= 1);
    }

    #[test]
    fn result_upsert_leaves_portrait_alone() {
        let s = store();
        let p = Portrait::new(vec![1], "image/png");
        s.put_portrait(8, &p, Utc::now()).unwrap();
        s.upsert_result(&result(8, "Keeper", 3)).unwrap();
        assert_eq!(s.get_portrait(8).unwrap().unwrap().portrait, Some(p));
    }
}
