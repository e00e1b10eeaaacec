//! Media models

use crate::store::Keyed;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Kind of media, derived from the declared content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Video iff the MIME type's top level is `video`; everything else is
    /// ingested as an image.
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

/// A single uploaded image or video.
///
/// `content` is a self-contained data URL, so the record stays portable
/// across the text-based fallback store at the cost of ~33% inflation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub kind: MediaKind,
    pub content: String,
    /// Original filename.
    pub title: String,
    /// Auto-generated upload-date caption.
    pub description: String,
    pub uploaded_at: DateTime<Utc>,
}

impl MediaItem {
    pub fn new(title: impl Into<String>, kind: MediaKind, content: String) -> Self {
        let uploaded_at = Utc::now();
        Self {
            id: new_media_id(uploaded_at),
            kind,
            content,
            title: title.into(),
            description: format!("Uploaded on {}", uploaded_at.format("%Y-%m-%d")),
            uploaded_at,
        }
    }
}

impl Keyed for MediaItem {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Millisecond timestamp plus a random hex suffix.
fn new_media_id(at: DateTime<Utc>) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..0x100_0000);
    format!("{}-{:06x}", at.timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(MediaKind::from_mime("video/mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("image/png"), MediaKind::Image);
        // Anything that is not video is treated as an image.
        assert_eq!(
            MediaKind::from_mime("application/octet-stream"),
            MediaKind::Image
        );
    }

    #[test]
    fn test_new_item_has_id_and_caption() {
        let item = MediaItem::new("a.png", MediaKind::Image, "data:image/png;base64,".into());

        assert!(!item.id.is_empty());
        assert!(item.id.contains('-'));
        assert_eq!(item.title, "a.png");
        assert!(item.description.starts_with("Uploaded on "));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = MediaItem::new("a", MediaKind::Image, String::new());
        let b = MediaItem::new("b", MediaKind::Image, String::new());
        assert_ne!(a.id, b.id);
    }
}
