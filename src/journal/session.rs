//! Debounced note editing session
//!
//! A session owns one date's note and an explicit pending-timer resource.
//! Every edit cancels and reschedules the timer; when the debounce delay
//! elapses without further edits, one save runs with the latest state.
//! `flush` saves immediately and is the authoritative way to end a
//! session; dropping the session aborts any pending timer.

use crate::config::{MAX_AUTO_SAVE_DELAY_MS, MIN_AUTO_SAVE_DELAY_MS};
use crate::error::Result;
use crate::journal::models::{DailyNote, TaskItem};
use crate::journal::store::JournalStore;
use crate::store::TextStore;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Editing session for a single date.
pub struct NoteSession<T: TextStore + 'static> {
    store: Arc<JournalStore<T>>,
    at: DateTime<Utc>,
    note: Arc<Mutex<DailyNote>>,
    pending: Option<JoinHandle<()>>,
    delay: Duration,
}

impl<T: TextStore + 'static> NoteSession<T> {
    /// Open a session on the note for `at`, lazily creating the empty
    /// note when none is stored. `delay_ms` is clamped to the configured
    /// auto-save bounds.
    pub fn open(store: Arc<JournalStore<T>>, at: DateTime<Utc>, delay_ms: u64) -> Self {
        let delay_ms = delay_ms.clamp(MIN_AUTO_SAVE_DELAY_MS, MAX_AUTO_SAVE_DELAY_MS);
        let note = store.load_or_default(at);

        Self {
            store,
            at,
            note: Arc::new(Mutex::new(note)),
            pending: None,
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// Snapshot of the current in-memory note.
    pub fn note(&self) -> DailyNote {
        self.lock().clone()
    }

    pub fn set_content(&mut self, text: &str) {
        self.lock().set_content(text);
        self.schedule();
    }

    pub fn set_mood(&mut self, mood: Option<&str>) {
        self.lock().mood = mood.map(|m| m.to_string());
        self.schedule();
    }

    /// Append a task and return its id.
    pub fn add_task(&mut self, text: &str) -> String {
        let task = TaskItem::new(text);
        let id = task.id.clone();
        self.lock().tasks.push(task);
        self.schedule();
        id
    }

    /// Flip a task's completed flag. Returns false for an unknown id.
    pub fn toggle_task(&mut self, id: &str) -> bool {
        let toggled = {
            let mut note = self.lock();
            match note.tasks.iter_mut().find(|t| t.id == id) {
                Some(task) => {
                    task.completed = !task.completed;
                    true
                }
                None => false,
            }
        };
        if toggled {
            self.schedule();
        }
        toggled
    }

    /// Remove a task. Returns false for an unknown id.
    pub fn remove_task(&mut self, id: &str) -> bool {
        let removed = {
            let mut note = self.lock();
            let before = note.tasks.len();
            note.tasks.retain(|t| t.id != id);
            note.tasks.len() != before
        };
        if removed {
            self.schedule();
        }
        removed
    }

    /// Cancel the pending timer and save the current state now.
    pub fn flush(&mut self) -> Result<()> {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let snapshot = self.lock().clone();
        self.store.save(self.at, snapshot)
    }

    /// Reset the debounce window: drop the pending save and arm a new one.
    fn schedule(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let store = Arc::clone(&self.store);
        let note = Arc::clone(&self.note);
        let at = self.at;
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let snapshot = note.lock().expect("note mutex poisoned").clone();
            if let Err(e) = store.save(at, snapshot) {
                tracing::warn!("Debounced save failed: {}", e);
            }
        }));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DailyNote> {
        self.note.lock().expect("note mutex poisoned")
    }
}

impl<T: TextStore + 'static> Drop for NoteSession<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
