//! Journal models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry in a daily note's task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl TaskItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            completed: false,
            created_at: Utc::now(),
        }
    }
}

/// The record for one calendar day.
///
/// Exactly one note exists per date key; a date with no stored record is
/// equivalent to `DailyNote::empty`, never an error. `word_count` is
/// derived from `content` and recomputed on every content change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyNote {
    /// Canonical date key, see [`crate::journal::day_key`].
    pub date: String,
    pub content: String,
    #[serde(default)]
    pub tasks: Vec<TaskItem>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub word_count: usize,
    /// Stamped by the store at write time.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl DailyNote {
    /// The default note a date lazily starts with.
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            content: String::new(),
            tasks: Vec::new(),
            mood: None,
            word_count: 0,
            last_updated: None,
        }
    }

    /// Replace the free text and recompute the word count.
    pub fn set_content(&mut self, text: &str) {
        self.content = text.to_string();
        self.word_count = self.content.split_whitespace().count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_content_recomputes_word_count() {
        let mut note = DailyNote::empty("2024-05-01");
        assert_eq!(note.word_count, 0);

        note.set_content("three  little words");
        assert_eq!(note.word_count, 3);

        note.set_content("");
        assert_eq!(note.word_count, 0);
    }

    #[test]
    fn test_new_task_is_incomplete_with_unique_id() {
        let a = TaskItem::new("water plants");
        let b = TaskItem::new("water plants");

        assert!(!a.completed);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_note_deserializes_without_optional_fields() {
        let note: DailyNote =
            serde_json::from_str(r#"{"date":"2024-05-01","content":"hi"}"#).unwrap();

        assert_eq!(note.date, "2024-05-01");
        assert!(note.tasks.is_empty());
        assert_eq!(note.mood, None);
        assert_eq!(note.last_updated, None);
    }
}
