//! Media gallery controller
//!
//! Orchestrates the full lifecycle of the media collection: initial load,
//! batch ingestion, selection mode and single/bulk deletion. The
//! controller owns the in-memory collection exclusively; every mutation
//! updates memory first, then triggers one persistence cycle through the
//! fallback wrapper.
//!
//! Persistence is refused until the initial load has completed, so a save
//! issued too early can never overwrite previously persisted data with an
//! empty collection.

use crate::media::encoder::{file_name, MediaEncoder};
use crate::media::models::MediaItem;
use crate::store::{FallbackPersistence, KeyValueStore, SaveOutcome, TextStore};
use std::collections::HashSet;
use std::path::PathBuf;

/// Selection-mode state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryMode {
    Browsing,
    Selecting,
}

/// A file the batch skipped, with the reason to surface to the user.
#[derive(Debug)]
pub struct SkippedFile {
    pub name: String,
    pub reason: crate::error::StoreError,
}

/// Outcome of one ingestion batch.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Ids of the items added, in ingestion order.
    pub added: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

/// Controller for the media collection.
pub struct MediaGallery<P, T>
where
    P: KeyValueStore<Record = MediaItem>,
    T: TextStore,
{
    persistence: FallbackPersistence<P, T>,
    encoder: MediaEncoder,
    items: Vec<MediaItem>,
    selection: HashSet<String>,
    mode: GalleryMode,
    loaded: bool,
}

impl<P, T> MediaGallery<P, T>
where
    P: KeyValueStore<Record = MediaItem>,
    T: TextStore,
{
    pub fn new(persistence: FallbackPersistence<P, T>, encoder: MediaEncoder) -> Self {
        Self {
            persistence,
            encoder,
            items: Vec::new(),
            selection: HashSet::new(),
            mode: GalleryMode::Browsing,
            loaded: false,
        }
    }

    /// Load the persisted collection. Idempotent; must complete before
    /// any mutation is persisted.
    ///
    /// Replaces whatever is in memory: mutations made before the first
    /// `load` stay session-only (the persist guard refuses them) and are
    /// discarded here in favor of the stored collection.
    pub async fn load(&mut self) {
        if self.loaded {
            return;
        }

        self.items = self.persistence.load().await;
        self.loaded = true;

        tracing::info!("Gallery loaded with {} items", self.items.len());
    }

    /// Ingest a batch of files sequentially.
    ///
    /// Oversized or unreadable files are skipped with their reason; the
    /// rest of the batch continues. One persistence cycle runs after the
    /// whole batch, and none when nothing was added.
    pub async fn ingest(&mut self, paths: &[PathBuf]) -> IngestReport {
        let mut report = IngestReport::default();

        // Sequential on purpose: outcomes are collected per file before a
        // single commit, and storage writes never interleave mid-batch.
        for path in paths {
            let name = file_name(path);
            match self.encoder.encode(path).await {
                Ok(encoded) => {
                    let item = MediaItem::new(name, encoded.kind, encoded.data_url);
                    report.added.push(item.id.clone());
                    self.items.push(item);
                }
                Err(reason) => {
                    tracing::warn!("Skipping {}: {}", name, reason);
                    report.skipped.push(SkippedFile { name, reason });
                }
            }
        }

        if !report.added.is_empty() {
            self.persist().await;
        }

        report
    }

    /// Delete a single item by id. Permitted only while browsing; returns
    /// whether an item was removed.
    pub async fn delete_one(&mut self, id: &str) -> bool {
        if self.mode == GalleryMode::Selecting {
            tracing::debug!("Ignoring single delete while selecting");
            return false;
        }

        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return false;
        }

        self.selection.remove(id);
        self.persist().await;
        true
    }

    /// Enter selection mode with an empty selection set.
    pub fn enter_selection(&mut self) {
        self.mode = GalleryMode::Selecting;
        self.selection.clear();
    }

    /// Toggle an item in or out of the selection set.
    pub fn toggle_selection(&mut self, id: &str) {
        if self.mode != GalleryMode::Selecting {
            return;
        }
        if !self.selection.remove(id) {
            self.selection.insert(id.to_string());
        }
    }

    /// Leave selection mode, discarding the selection set.
    pub fn cancel_selection(&mut self) {
        self.mode = GalleryMode::Browsing;
        self.selection.clear();
    }

    /// Delete every selected item in one pass and return to browsing.
    /// A no-op with an empty selection set (no persistence triggered).
    pub async fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }

        let before = self.items.len();
        self.items.retain(|item| !self.selection.contains(&item.id));
        tracing::info!("Deleted {} selected items", before - self.items.len());

        self.selection.clear();
        self.mode = GalleryMode::Browsing;
        self.persist().await;
    }

    /// Clear the entire collection. Confirmation is the caller's concern.
    pub async fn delete_all(&mut self) {
        self.items.clear();
        self.selection.clear();
        self.mode = GalleryMode::Browsing;
        self.persist().await;
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn mode(&self) -> GalleryMode {
        self.mode
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    async fn persist(&self) -> Option<SaveOutcome> {
        if !self.loaded {
            tracing::warn!("Persist refused: initial load has not completed");
            return None;
        }
        Some(self.persistence.save(&self.items).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_MEDIA_FILE_BYTES;
    use crate::error::Result;
    use crate::media::models::MediaKind;
    use crate::store::MemoryTextStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// In-memory primary that counts `replace_all` calls.
    #[derive(Default)]
    struct CountingKvStore {
        records: Mutex<Vec<MediaItem>>,
        saves: AtomicUsize,
    }

    #[async_trait]
    impl KeyValueStore for Arc<CountingKvStore> {
        type Record = MediaItem;

        async fn open(&self) -> Result<()> {
            Ok(())
        }

        async fn replace_all(&self, items: &[MediaItem]) -> Result<()> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            *self.records.lock().unwrap() = items.to_vec();
            Ok(())
        }

        async fn get_all(&self) -> Result<Vec<MediaItem>> {
            Ok(self.records.lock().unwrap().clone())
        }
    }

    fn gallery(
        primary: Arc<CountingKvStore>,
    ) -> MediaGallery<Arc<CountingKvStore>, MemoryTextStore> {
        MediaGallery::new(
            FallbackPersistence::new(primary, MemoryTextStore::new(), "media.fallback"),
            MediaEncoder::new(MAX_MEDIA_FILE_BYTES),
        )
    }

    async fn loaded_gallery() -> (
        MediaGallery<Arc<CountingKvStore>, MemoryTextStore>,
        Arc<CountingKvStore>,
    ) {
        let primary = Arc::new(CountingKvStore::default());
        let mut g = gallery(Arc::clone(&primary));
        g.load().await;
        (g, primary)
    }

    fn write_file(dir: &TempDir, name: &str, len: usize) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, vec![0u8; len]).unwrap();
        path
    }

    #[tokio::test]
    async fn test_ingest_batch_is_one_persistence_call() {
        let (mut g, primary) = loaded_gallery().await;
        let dir = TempDir::new().unwrap();

        let paths = vec![
            write_file(&dir, "a.png", 100),
            write_file(&dir, "b.jpg", 200),
            write_file(&dir, "c.mp4", 300),
        ];

        let report = g.ingest(&paths).await;

        assert_eq!(report.added.len(), 3);
        assert!(report.skipped.is_empty());
        assert_eq!(g.items().len(), 3);
        assert_eq!(g.items()[2].kind, MediaKind::Video);
        assert_eq!(primary.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_oversized_file_skipped_but_batch_continues() {
        let primary = Arc::new(CountingKvStore::default());
        let mut g = MediaGallery::new(
            FallbackPersistence::new(Arc::clone(&primary), MemoryTextStore::new(), "fb"),
            MediaEncoder::new(150),
        );
        g.load().await;

        let dir = TempDir::new().unwrap();
        let paths = vec![
            write_file(&dir, "big.mp4", 500),
            write_file(&dir, "small.png", 100),
        ];

        let report = g.ingest(&paths).await;

        assert_eq!(report.added.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "big.mp4");
        assert_eq!(g.items().len(), 1);
        assert_eq!(g.items()[0].title, "small.png");
        assert_eq!(primary.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_all_skipped_batch_triggers_no_persistence() {
        let primary = Arc::new(CountingKvStore::default());
        let mut g = MediaGallery::new(
            FallbackPersistence::new(Arc::clone(&primary), MemoryTextStore::new(), "fb"),
            MediaEncoder::new(10),
        );
        g.load().await;

        let dir = TempDir::new().unwrap();
        let report = g.ingest(&[write_file(&dir, "big.png", 100)]).await;

        assert!(report.added.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(primary.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_persistence_before_initial_load() {
        let primary = Arc::new(CountingKvStore::default());
        let mut g = gallery(Arc::clone(&primary));
        // load() deliberately not called

        let dir = TempDir::new().unwrap();
        g.ingest(&[write_file(&dir, "a.png", 10)]).await;

        assert_eq!(g.items().len(), 1);
        assert_eq!(primary.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_load_replaces_items_ingested_before_it() {
        let primary = Arc::new(CountingKvStore::default());
        *primary.records.lock().unwrap() = vec![MediaItem::new(
            "stored.png",
            MediaKind::Image,
            "data:image/png;base64,".into(),
        )];

        let mut g = gallery(Arc::clone(&primary));
        let dir = TempDir::new().unwrap();
        g.ingest(&[write_file(&dir, "early.png", 10)]).await;

        // The pre-load item was never persisted, and the load discards it
        // in favor of the stored collection.
        g.load().await;

        assert_eq!(g.items().len(), 1);
        assert_eq!(g.items()[0].title, "stored.png");
        assert_eq!(primary.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_delete_one_only_while_browsing() {
        let (mut g, primary) = loaded_gallery().await;
        let dir = TempDir::new().unwrap();
        g.ingest(&[write_file(&dir, "a.png", 10)]).await;
        let id = g.items()[0].id.clone();

        g.enter_selection();
        assert!(!g.delete_one(&id).await);
        assert_eq!(g.items().len(), 1);

        g.cancel_selection();
        assert!(g.delete_one(&id).await);
        assert!(g.items().is_empty());
        assert!(!g.delete_one(&id).await);

        // ingest + one real delete
        assert_eq!(primary.saves.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_selection() {
        let (mut g, _primary) = loaded_gallery().await;
        let dir = TempDir::new().unwrap();
        g.ingest(&[write_file(&dir, "a.png", 10)]).await;
        let id = g.items()[0].id.clone();

        g.enter_selection();
        assert!(!g.is_selected(&id));

        g.toggle_selection(&id);
        assert!(g.is_selected(&id));

        g.toggle_selection(&id);
        assert!(!g.is_selected(&id));
        assert_eq!(g.selection_len(), 0);
    }

    #[tokio::test]
    async fn test_delete_selected_empty_set_is_noop() {
        let (mut g, primary) = loaded_gallery().await;
        let dir = TempDir::new().unwrap();
        g.ingest(&[write_file(&dir, "a.png", 10)]).await;
        let saves_before = primary.saves.load(Ordering::SeqCst);

        g.enter_selection();
        g.delete_selected().await;

        assert_eq!(g.items().len(), 1);
        assert_eq!(primary.saves.load(Ordering::SeqCst), saves_before);
        // Empty-set delete does not leave selection mode either.
        assert_eq!(g.mode(), GalleryMode::Selecting);
    }

    #[tokio::test]
    async fn test_delete_selected_removes_items_and_returns_to_browsing() {
        let (mut g, primary) = loaded_gallery().await;
        let dir = TempDir::new().unwrap();
        g.ingest(&[
            write_file(&dir, "a.png", 10),
            write_file(&dir, "b.png", 10),
            write_file(&dir, "c.png", 10),
        ])
        .await;
        let keep = g.items()[1].id.clone();
        let doomed: Vec<String> = [0, 2].iter().map(|&i| g.items()[i].id.clone()).collect();
        let saves_before = primary.saves.load(Ordering::SeqCst);

        g.enter_selection();
        for id in &doomed {
            g.toggle_selection(id);
        }
        g.delete_selected().await;

        assert_eq!(g.mode(), GalleryMode::Browsing);
        assert_eq!(g.selection_len(), 0);
        assert_eq!(g.items().len(), 1);
        assert_eq!(g.items()[0].id, keep);
        assert_eq!(primary.saves.load(Ordering::SeqCst), saves_before + 1);
    }

    #[tokio::test]
    async fn test_cancel_selection_discards_set() {
        let (mut g, _primary) = loaded_gallery().await;
        let dir = TempDir::new().unwrap();
        g.ingest(&[write_file(&dir, "a.png", 10)]).await;
        let id = g.items()[0].id.clone();

        g.enter_selection();
        g.toggle_selection(&id);
        g.cancel_selection();

        assert_eq!(g.mode(), GalleryMode::Browsing);
        assert_eq!(g.selection_len(), 0);
        assert_eq!(g.items().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_all_clears_and_persists_empty() {
        let (mut g, primary) = loaded_gallery().await;
        let dir = TempDir::new().unwrap();
        g.ingest(&[write_file(&dir, "a.png", 10), write_file(&dir, "b.png", 10)])
            .await;

        g.delete_all().await;

        assert!(g.items().is_empty());
        assert!(primary.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_through_fresh_gallery() {
        let primary = Arc::new(CountingKvStore::default());
        let dir = TempDir::new().unwrap();

        let original = {
            let mut g = gallery(Arc::clone(&primary));
            g.load().await;
            g.ingest(&[write_file(&dir, "a.png", 64), write_file(&dir, "b.mp4", 64)])
                .await;
            g.items().to_vec()
        };

        // Fresh controller over the same primary store.
        let mut g = gallery(primary);
        g.load().await;

        assert_eq!(g.items(), original.as_slice());
    }
}
