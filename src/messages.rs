//! Message thread storage
//!
//! Threads persist as one serialized JSON array under a single fixed key,
//! the same bulk load/replace pattern the media fallback blob uses. There
//! is no per-thread update path; callers replace the whole list.

use crate::config::MESSAGES_KEY;
use crate::error::Result;
use crate::store::TextStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One message inside a thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender: sender.into(),
            body: body.into(),
            sent_at: Utc::now(),
        }
    }
}

/// A conversation thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageThread {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl MessageThread {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            messages: Vec::new(),
        }
    }
}

/// Bulk store for message threads.
pub struct MessageStore<T: TextStore> {
    store: T,
}

impl<T: TextStore> MessageStore<T> {
    pub fn new(store: T) -> Self {
        Self { store }
    }

    /// Every stored thread. Absent or corrupt data degrades to an empty
    /// list, matching the fallback load policy.
    pub fn load_all(&self) -> Vec<MessageThread> {
        match self.store.get(MESSAGES_KEY) {
            Some(blob) => serde_json::from_str(&blob).unwrap_or_else(|e| {
                tracing::warn!("Message threads are corrupt, starting empty: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        }
    }

    /// Replace the whole thread list.
    pub fn replace_all(&self, threads: &[MessageThread]) -> Result<()> {
        let blob = serde_json::to_string(threads)?;
        self.store.set(MESSAGES_KEY, &blob)
    }
}
