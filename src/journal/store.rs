//! Date-keyed note storage
//!
//! The whole journal serializes as one JSON object (date key -> note)
//! under a single fixed key in the text store. Every save rewrites the
//! map; at journal scale that is cheaper than managing per-day keys and
//! keeps the layout portable across the fallback store.

use crate::config::JOURNAL_KEY;
use crate::error::Result;
use crate::journal::day_key;
use crate::journal::models::DailyNote;
use crate::store::TextStore;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Store mapping calendar dates to daily notes.
pub struct JournalStore<T: TextStore> {
    store: T,
}

impl<T: TextStore> JournalStore<T> {
    pub fn new(store: T) -> Self {
        Self { store }
    }

    /// Look up the note for a date. `None` when absent (not an error).
    pub fn load(&self, at: DateTime<Utc>) -> Option<DailyNote> {
        self.load_map().remove(&day_key(at))
    }

    /// The note for a date, or the empty note a fresh date starts with.
    pub fn load_or_default(&self, at: DateTime<Utc>) -> DailyNote {
        self.load(at)
            .unwrap_or_else(|| DailyNote::empty(day_key(at)))
    }

    /// Overwrite the note for a date, stamping `last_updated`.
    pub fn save(&self, at: DateTime<Utc>, mut note: DailyNote) -> Result<()> {
        let key = day_key(at);
        note.date = key.clone();
        note.last_updated = Some(Utc::now());

        let mut map = self.load_map();
        map.insert(key, note);
        self.store_map(&map)
    }

    /// Every stored note, keyed by date. Range views (e.g. a week) filter
    /// this map client-side.
    pub fn load_all(&self) -> BTreeMap<String, DailyNote> {
        self.load_map()
    }

    /// Remove the note for a date. No-op (and no rewrite) when absent.
    pub fn delete(&self, at: DateTime<Utc>) -> Result<()> {
        let mut map = self.load_map();
        if map.remove(&day_key(at)).is_none() {
            return Ok(());
        }
        self.store_map(&map)
    }

    fn load_map(&self) -> BTreeMap<String, DailyNote> {
        match self.store.get(JOURNAL_KEY) {
            Some(blob) => serde_json::from_str(&blob).unwrap_or_else(|e| {
                tracing::warn!("Journal map is corrupt, starting empty: {}", e);
                BTreeMap::new()
            }),
            None => BTreeMap::new(),
        }
    }

    fn store_map(&self, map: &BTreeMap<String, DailyNote>) -> Result<()> {
        let blob = serde_json::to_string(map)?;
        self.store.set(JOURNAL_KEY, &blob)
    }
}
