//! Scripted providers for tests and offline runs.

use super::{CharacterDirectory, FeedSource, PortraitSource};
use crate::model::{EventRecord, Portrait};
use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub enum PageScript {
    Records(Vec<EventRecord>),
    Fail(String),
}

/// Replays a fixed list of pages. Pages past the script are empty, unless
/// `repeat_last` is set, in which case the last scripted page repeats forever.
pub struct ScriptedFeed {
    pages: Vec<PageScript>,
    repeat_last: bool,
    requested: Mutex<Vec<u32>>,
}

impl ScriptedFeed {
    pub fn new(pages: Vec<PageScript>) -> Self {
        Self {
            pages,
            repeat_last: false,
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Pages of `sizes[i]` killmails each, every killmail worth `value_each`.
    pub fn with_page_sizes(sizes: &[usize], value_each: f64) -> Self {
        let mut next_id = 1;
        let pages = sizes
            .iter()
            .map(|&n| {
                let records = (0..n)
                    .map(|_| {
                        let r = killmail(next_id, value_each);
                        next_id += 1;
                        r
                    })
                    .collect();
                PageScript::Records(records)
            })
            .collect();
        Self::new(pages)
    }

    pub fn endless(page: Vec<EventRecord>) -> Self {
        Self {
            pages: vec![PageScript::Records(page)],
            repeat_last: true,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requested_pages().len()
    }
}

#[async_trait]
impl FeedSource for ScriptedFeed {
    async fn fetch_page(&self, _character_id: i64, page: u32) -> anyhow::Result<Vec<EventRecord>> {
        if let Ok(mut g) = self.requested.lock() {
            g.push(page);
        }

        let idx = page.saturating_sub(1) as usize;
        let script = match self.pages.get(idx) {
            Some(s) => s,
            None if self.repeat_last => match self.pages.last() {
                Some(s) => s,
                None => return Ok(Vec::new()),
            },
            None => return Ok(Vec::new()),
        };

        match script {
            PageScript::Records(records) => Ok(records.clone()),
            PageScript::Fail(msg) => anyhow::bail!("{}", msg),
        }
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

/// Hands out queued responses in order; fails once the queue is drained.
#[derive(Default)]
pub struct ScriptedPortraits {
    queue: Mutex<VecDeque<Result<Portrait, String>>>,
    calls: Mutex<u32>,
}

impl ScriptedPortraits {
    pub fn new(responses: Vec<Result<Portrait, String>>) -> Self {
        Self {
            queue: Mutex::new(responses.into()),
            calls: Mutex::new(0),
        }
    }

    pub fn always_failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> u32 {
        self.calls.lock().map(|g| *g).unwrap_or_default()
    }
}

#[async_trait]
impl PortraitSource for ScriptedPortraits {
    async fn fetch_portrait(&self, character_id: i64) -> anyhow::Result<Portrait> {
        if let Ok(mut g) = self.calls.lock() {
            *g += 1;
        }
        let next = self.queue.lock().ok().and_then(|mut q| q.pop_front());
        match next {
            Some(Ok(p)) => Ok(p),
            Some(Err(msg)) => anyhow::bail!("{}", msg),
            None => anyhow::bail!("image service unreachable for character {}", character_id),
        }
    }
}

/// Directory that knows a fixed set of `(id, name)` characters.
pub struct StaticDirectory {
    pub characters: Vec<(i64, String)>,
}

#[async_trait]
impl CharacterDirectory for StaticDirectory {
    async fn search(&self, name: &str) -> anyhow::Result<serde_json::Value> {
        let hits: Vec<_> = self
            .characters
            .iter()
            .filter(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(id, n)| json!({"id": id, "name": n}))
            .collect();
        if hits.is_empty() {
            return Ok(json!({}));
        }
        Ok(json!({ "characters": hits }))
    }

    async fn lookup(&self, character_id: i64) -> anyhow::Result<serde_json::Value> {
        let hits: Vec<_> = self
            .characters
            .iter()
            .filter(|(id, _)| *id == character_id)
            .map(|(id, n)| json!({"category": "character", "id": id, "name": n}))
            .collect();
        Ok(serde_json::Value::Array(hits))
    }
}

pub fn killmail(id: i64, total_value: f64) -> EventRecord {
    EventRecord::new(json!({
        "killmail_id": id,
        "zkb": { "totalValue": total_value, "npc": false }
    }))
}
