//! Workspace wiring
//!
//! Builds the concrete storage stack for one data directory: a SQLite
//! primary store for media with the shared text store as its fallback,
//! and the journal/planner/message/profile stores on the same text store.
//!
//! A workspace owns its data exclusively. Two workspaces opened on the
//! same directory do not coordinate; concurrent sessions are last-write-
//! wins.

use crate::config::{
    AUTO_SAVE_DELAY_MS, MAX_MEDIA_FILE_BYTES, MEDIA_COLLECTION, MEDIA_FALLBACK_KEY,
    TEXT_STORE_QUOTA_BYTES,
};
use crate::error::Result;
use crate::journal::{JournalStore, NoteSession};
use crate::media::{MediaEncoder, MediaGallery, MediaItem};
use crate::messages::MessageStore;
use crate::planner::PlannerStore;
use crate::profile::ProfileStore;
use crate::store::{FallbackPersistence, FileTextStore, SqliteKvStore};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;

/// The text store shared by every synchronous domain store.
pub type SharedTextStore = Arc<FileTextStore>;

/// Concrete gallery type for a file-backed workspace.
pub type Gallery = MediaGallery<SqliteKvStore<MediaItem>, SharedTextStore>;

/// All stores for one data directory.
pub struct Workspace {
    pub gallery: Gallery,
    pub journal: Arc<JournalStore<SharedTextStore>>,
    pub planner: PlannerStore<SharedTextStore>,
    pub messages: MessageStore<SharedTextStore>,
    pub profiles: ProfileStore<SharedTextStore>,
}

impl Workspace {
    /// Open (or create) the workspace at `data_dir` and run the gallery's
    /// initial load.
    pub async fn open(data_dir: &Path) -> Result<Self> {
        tracing::info!("Opening workspace at: {:?}", data_dir);

        std::fs::create_dir_all(data_dir)?;

        let text_store: SharedTextStore = Arc::new(FileTextStore::open(
            data_dir.join("local.json"),
            TEXT_STORE_QUOTA_BYTES,
        )?);

        let primary = SqliteKvStore::new(&data_dir.join("daybook.db"), MEDIA_COLLECTION)?;
        let persistence =
            FallbackPersistence::new(primary, Arc::clone(&text_store), MEDIA_FALLBACK_KEY);
        let mut gallery = MediaGallery::new(persistence, MediaEncoder::new(MAX_MEDIA_FILE_BYTES));
        gallery.load().await;

        Ok(Self {
            gallery,
            journal: Arc::new(JournalStore::new(Arc::clone(&text_store))),
            planner: PlannerStore::new(Arc::clone(&text_store)),
            messages: MessageStore::new(Arc::clone(&text_store)),
            profiles: ProfileStore::new(text_store),
        })
    }

    /// Start a debounced editing session on the note for `at`.
    pub fn edit_note(&self, at: DateTime<Utc>) -> NoteSession<SharedTextStore> {
        NoteSession::open(Arc::clone(&self.journal), at, AUTO_SAVE_DELAY_MS)
    }
}
