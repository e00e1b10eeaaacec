//! Media module
//!
//! The media gallery: encoded image/video records, the encoder that turns
//! files into storable data URLs, and the controller orchestrating load,
//! ingestion, selection and deletion.

pub mod encoder;
pub mod gallery;
pub mod models;

pub use encoder::{EncodedMedia, MediaEncoder};
pub use gallery::{GalleryMode, IngestReport, MediaGallery, SkippedFile};
pub use models::{MediaItem, MediaKind};
