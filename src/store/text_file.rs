//! File-backed text store
//!
//! Synchronous secondary store: a single JSON object file holding a flat
//! string-to-string map, cached in memory and written through on every
//! mutation. Writes go to a temp file first and rename into place
//! (atomic write), so a crash mid-write never corrupts the map.
//!
//! The quota bounds the serialized size of the whole map, mirroring a
//! localStorage-class store. A write that would exceed it is rejected
//! without touching the previous contents.

use crate::error::{Result, StoreError};
use crate::store::TextStore;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// JSON-file implementation of [`TextStore`].
pub struct FileTextStore {
    path: PathBuf,
    map: Mutex<HashMap<String, String>>,
    quota: usize,
}

impl FileTextStore {
    /// Open the store at `path`, loading existing contents if present.
    pub fn open(path: PathBuf, quota: usize) -> Result<Self> {
        let map = if path.exists() {
            let content = fs::read_to_string(&path)?;
            match serde_json::from_str(&content) {
                Ok(map) => map,
                Err(e) => {
                    // A corrupt map file degrades to an empty store rather
                    // than blocking startup.
                    tracing::warn!("Text store at {:?} is corrupt, starting empty: {}", path, e);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            map: Mutex::new(map),
            quota,
        })
    }

    fn write_out(&self, serialized: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, serialized)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

impl TextStore for FileTextStore {
    fn get(&self, key: &str) -> Option<String> {
        let map = self.map.lock().expect("text store mutex poisoned");
        map.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.map.lock().expect("text store mutex poisoned");

        let mut candidate = map.clone();
        candidate.insert(key.to_string(), value.to_string());
        let serialized = serde_json::to_string(&candidate)?;
        if serialized.len() > self.quota {
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
                size: serialized.len(),
                quota: self.quota,
            });
        }

        self.write_out(&serialized)?;
        *map = candidate;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.map.lock().expect("text store mutex poisoned");

        if !map.contains_key(key) {
            return Ok(());
        }

        let mut candidate = map.clone();
        candidate.remove(key);
        let serialized = serde_json::to_string(&candidate)?;

        self.write_out(&serialized)?;
        *map = candidate;

        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        let map = self.map.lock().expect("text store mutex poisoned");
        map.keys().cloned().collect()
    }
}
