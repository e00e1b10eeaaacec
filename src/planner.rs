//! Planner day storage
//!
//! One raw text value per calendar day, stored under a per-date key with
//! a fixed prefix. Unlike the journal this is unstructured: the planner
//! page owns its own text format.

use crate::config::PLANNER_DAY_PREFIX;
use crate::error::Result;
use crate::journal::day_key;
use crate::store::TextStore;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Store for per-day planner text.
pub struct PlannerStore<T: TextStore> {
    store: T,
}

impl<T: TextStore> PlannerStore<T> {
    pub fn new(store: T) -> Self {
        Self { store }
    }

    /// The planner text for a day, if any was saved.
    pub fn day(&self, at: DateTime<Utc>) -> Option<String> {
        self.store.get(&key_for(at))
    }

    /// Save the planner text for a day. Empty text clears the key instead
    /// of storing an empty value.
    pub fn set_day(&self, at: DateTime<Utc>, text: &str) -> Result<()> {
        if text.is_empty() {
            return self.store.remove(&key_for(at));
        }
        self.store.set(&key_for(at), text)
    }

    /// Remove the planner text for a day. No-op when absent.
    pub fn clear_day(&self, at: DateTime<Utc>) -> Result<()> {
        self.store.remove(&key_for(at))
    }

    /// Every day with planner text, keyed by date. Week views filter the
    /// sorted map client-side.
    pub fn entries(&self) -> BTreeMap<String, String> {
        let mut entries = BTreeMap::new();
        for key in self.store.keys() {
            if let Some(date) = key.strip_prefix(PLANNER_DAY_PREFIX) {
                if let Some(text) = self.store.get(&key) {
                    entries.insert(date.to_string(), text);
                }
            }
        }
        entries
    }
}

fn key_for(at: DateTime<Utc>) -> String {
    format!("{}{}", PLANNER_DAY_PREFIX, day_key(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTextStore;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_set_and_get_day_text() {
        let planner = PlannerStore::new(MemoryTextStore::new());

        planner.set_day(at(1, 9), "09:00 standup").unwrap();

        // Same day, different time of day.
        assert_eq!(planner.day(at(1, 23)).as_deref(), Some("09:00 standup"));
        assert_eq!(planner.day(at(2, 9)), None);
    }

    #[test]
    fn test_empty_text_clears_the_key() {
        let planner = PlannerStore::new(MemoryTextStore::new());

        planner.set_day(at(1, 9), "something").unwrap();
        planner.set_day(at(1, 9), "").unwrap();

        assert_eq!(planner.day(at(1, 9)), None);
        assert!(planner.entries().is_empty());
    }

    #[test]
    fn test_entries_scans_only_planner_keys() {
        let store = std::sync::Arc::new(MemoryTextStore::new());
        store.set("unrelated.key", "ignore me").unwrap();

        let planner = PlannerStore::new(std::sync::Arc::clone(&store));
        planner.set_day(at(1, 9), "monday").unwrap();
        planner.set_day(at(2, 9), "tuesday").unwrap();

        let entries = planner.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries["2024-05-01"], "monday");
        assert_eq!(entries["2024-05-02"], "tuesday");
    }

    #[test]
    fn test_clear_day() {
        let planner = PlannerStore::new(MemoryTextStore::new());

        planner.clear_day(at(1, 9)).unwrap();

        planner.set_day(at(1, 9), "plans").unwrap();
        planner.clear_day(at(1, 9)).unwrap();
        assert_eq!(planner.day(at(1, 9)), None);
    }
}
