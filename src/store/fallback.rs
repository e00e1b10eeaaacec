//! Fallback persistence policy
//!
//! Wraps the primary [`KeyValueStore`] with a secondary [`TextStore`]
//! used when the primary errors. The policy favors never blocking the
//! caller over guaranteeing durability: `save` and `load` are total, and
//! the worst outcome is a session whose changes do not survive a reload.
//!
//! An `open` failure is sticky: the rest of the session runs against the
//! fallback store. There is no reconciliation when the primary becomes
//! available again later; whichever path the next session reads first
//! wins (last-session-wins).

use crate::store::{KeyValueStore, TextStore};
use std::sync::atomic::{AtomicBool, Ordering};

/// Where a `save` ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written to the primary store.
    Durable,
    /// Primary failed; written as a serialized blob to the secondary store.
    Fallback,
    /// Both stores failed. In-memory state is retained for the session but
    /// will not survive a reload.
    MemoryOnly,
}

/// Primary store with a secondary fallback.
pub struct FallbackPersistence<P, T> {
    primary: P,
    secondary: T,
    fallback_key: String,
    opened: AtomicBool,
    degraded: AtomicBool,
}

impl<P, T> FallbackPersistence<P, T>
where
    P: KeyValueStore,
    T: TextStore,
{
    pub fn new(primary: P, secondary: T, fallback_key: &str) -> Self {
        Self {
            primary,
            secondary,
            fallback_key: fallback_key.to_string(),
            opened: AtomicBool::new(false),
            degraded: AtomicBool::new(false),
        }
    }

    /// Whether the session has switched to the fallback store for good.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    /// Open the primary lazily; once it fails, stop trying for the session.
    async fn primary_ready(&self) -> bool {
        if self.degraded.load(Ordering::Relaxed) {
            return false;
        }
        if self.opened.load(Ordering::Relaxed) {
            return true;
        }

        match self.primary.open().await {
            Ok(()) => {
                self.opened.store(true, Ordering::Relaxed);
                true
            }
            Err(e) => {
                tracing::warn!("Primary store unavailable, using fallback: {}", e);
                self.degraded.store(true, Ordering::Relaxed);
                false
            }
        }
    }

    /// Persist the full collection, falling back as needed. Never errors.
    pub async fn save(&self, items: &[P::Record]) -> SaveOutcome {
        if self.primary_ready().await {
            match self.primary.replace_all(items).await {
                Ok(()) => return SaveOutcome::Durable,
                Err(e) => {
                    tracing::warn!("Primary save failed, writing fallback blob: {}", e);
                }
            }
        }

        let blob = match serde_json::to_string(items) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!("Could not serialize fallback blob: {}", e);
                return SaveOutcome::MemoryOnly;
            }
        };

        match self.secondary.set(&self.fallback_key, &blob) {
            Ok(()) => SaveOutcome::Fallback,
            Err(e) => {
                tracing::warn!(
                    "Fallback save failed, changes will not survive a reload: {}",
                    e
                );
                SaveOutcome::MemoryOnly
            }
        }
    }

    /// Load the collection from whichever store answers. Never errors;
    /// a double failure yields an empty collection.
    pub async fn load(&self) -> Vec<P::Record> {
        if self.primary_ready().await {
            match self.primary.get_all().await {
                Ok(items) => return items,
                Err(e) => {
                    tracing::warn!("Primary load failed, trying fallback blob: {}", e);
                }
            }
        }

        match self.secondary.get(&self.fallback_key) {
            Some(blob) => serde_json::from_str(&blob).unwrap_or_else(|e| {
                tracing::warn!("Fallback blob is corrupt, starting empty: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        }
    }
}
