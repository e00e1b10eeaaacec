//! In-memory store implementations
//!
//! Substitutable stand-ins for the SQLite and file-backed stores, used by
//! tests and by callers that want a session-only workspace. Both honor the
//! same contracts as their durable counterparts, including the text store
//! quota.

use crate::error::{Result, StoreError};
use crate::store::{KeyValueStore, Keyed, TextStore};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory [`KeyValueStore`] preserving insertion order.
#[derive(Default)]
pub struct MemoryKvStore<R> {
    records: Mutex<Vec<R>>,
}

impl<R> MemoryKvStore<R> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl<R> KeyValueStore for MemoryKvStore<R>
where
    R: Keyed + Serialize + DeserializeOwned + Clone + Send + Sync,
{
    type Record = R;

    async fn open(&self) -> Result<()> {
        Ok(())
    }

    async fn replace_all(&self, items: &[R]) -> Result<()> {
        let mut records = self.records.lock().expect("kv store mutex poisoned");
        *records = items.to_vec();
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<R>> {
        let records = self.records.lock().expect("kv store mutex poisoned");
        Ok(records.clone())
    }
}

/// In-memory [`TextStore`] with the same quota semantics as the file store.
pub struct MemoryTextStore {
    map: Mutex<HashMap<String, String>>,
    quota: usize,
}

impl MemoryTextStore {
    pub fn new() -> Self {
        Self::with_quota(crate::config::TEXT_STORE_QUOTA_BYTES)
    }

    /// A store with a custom quota, for exercising quota failures.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            map: Mutex::new(HashMap::new()),
            quota,
        }
    }
}

impl Default for MemoryTextStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TextStore for MemoryTextStore {
    fn get(&self, key: &str) -> Option<String> {
        let map = self.map.lock().expect("text store mutex poisoned");
        map.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.map.lock().expect("text store mutex poisoned");

        // Quota applies to the serialized size of the whole map.
        let mut candidate = map.clone();
        candidate.insert(key.to_string(), value.to_string());
        let size = serde_json::to_string(&candidate)?.len();
        if size > self.quota {
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
                size,
                quota: self.quota,
            });
        }

        *map = candidate;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.map.lock().expect("text store mutex poisoned");
        map.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        let map = self.map.lock().expect("text store mutex poisoned");
        map.keys().cloned().collect()
    }
}
