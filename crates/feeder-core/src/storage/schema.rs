pub const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS leaderboard (
  character_id INTEGER PRIMARY KEY,
  character_name TEXT NOT NULL,
  total_value INTEGER NOT NULL,
  killmail_count INTEGER NOT NULL DEFAULT 0,
  last_updated TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_leaderboard_total_value
  ON leaderboard(total_value DESC);

CREATE TABLE IF NOT EXISTS portraits (
  character_id INTEGER PRIMARY KEY,
  image_data BLOB,
  image_content_type TEXT,
  image_fetched_at TEXT,
  CHECK (image_data IS NULL OR image_content_type IS NOT NULL)
);
"#;
