//! Store module
//!
//! Storage abstractions for the persistence core:
//! - [`KeyValueStore`]: asynchronous durable storage of keyed records
//! - [`TextStore`]: synchronous, size-limited string storage used as the
//!   fallback when the primary store is unavailable
//! - [`FallbackPersistence`]: the save/load policy combining the two

pub mod fallback;
pub mod memory;
pub mod sqlite;
pub mod text_file;

pub use fallback::{FallbackPersistence, SaveOutcome};
pub use memory::{MemoryKvStore, MemoryTextStore};
pub use sqlite::SqliteKvStore;
pub use text_file::FileTextStore;

use crate::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// A record addressable by a stable string key.
///
/// The store layer imposes no schema beyond this: any serializable
/// record with an identifier can be persisted.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Durable, asynchronous storage of keyed records.
///
/// Implementations must make `replace_all` atomic: a failure partway
/// through must not leave a partial collection visible to `get_all`.
/// Callers never retry a failed operation; they fall through to
/// [`FallbackPersistence`].
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    type Record: Keyed + Serialize + DeserializeOwned + Clone + Send + Sync;

    /// Idempotently initialize the backing structure.
    ///
    /// Fails with [`crate::error::StoreError::Unavailable`] when the
    /// environment disallows persistent storage.
    async fn open(&self) -> Result<()>;

    /// Atomically clear the collection and insert the given records.
    async fn replace_all(&self, items: &[Self::Record]) -> Result<()>;

    /// Return every stored record in insertion order.
    async fn get_all(&self) -> Result<Vec<Self::Record>>;
}

/// Synchronous, size-limited string storage.
///
/// Models a localStorage-class store: a flat string-to-string map with a
/// quota of a few MB of serialized text. Writes past the quota fail with
/// [`crate::error::StoreError::QuotaExceeded`].
pub trait TextStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn keys(&self) -> Vec<String>;
}

// One store instance commonly backs several domain stores.
impl<T: TextStore + ?Sized> TextStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}
