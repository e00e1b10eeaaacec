//! Media encoder
//!
//! Converts a file into a storable, self-describing data URL string
//! while enforcing the ingestion size ceiling. The ceiling is checked
//! against file metadata before any bytes are read, so oversized files
//! cost nothing beyond a stat.

use crate::error::{Result, StoreError};
use crate::media::models::MediaKind;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::path::Path;
use tokio::fs;

/// Result of encoding one file.
#[derive(Debug, Clone)]
pub struct EncodedMedia {
    pub mime: String,
    pub kind: MediaKind,
    /// `data:<mime>;base64,<payload>`
    pub data_url: String,
    /// Original byte size, before base64 inflation.
    pub size: u64,
}

/// File-to-data-URL encoder with a size ceiling.
#[derive(Debug, Clone, Copy)]
pub struct MediaEncoder {
    max_bytes: u64,
}

impl MediaEncoder {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Encode the file at `path`.
    ///
    /// Fails with `FileTooLarge` past the ceiling (without reading the
    /// file) and `Read` on any I/O failure. No side effects beyond the
    /// read.
    pub async fn encode(&self, path: &Path) -> Result<EncodedMedia> {
        let name = file_name(path);

        let meta = fs::metadata(path).await.map_err(|source| StoreError::Read {
            name: name.clone(),
            source,
        })?;

        if meta.len() > self.max_bytes {
            return Err(StoreError::FileTooLarge {
                name,
                size: meta.len(),
                limit: self.max_bytes,
            });
        }

        let bytes = fs::read(path).await.map_err(|source| StoreError::Read {
            name: name.clone(),
            source,
        })?;

        let mime = mime_guess::from_path(path).first_or_octet_stream();

        self.encode_bytes(&name, mime.essence_str(), &bytes)
    }

    /// Encode in-memory bytes with a declared MIME type.
    pub fn encode_bytes(&self, name: &str, mime: &str, bytes: &[u8]) -> Result<EncodedMedia> {
        if bytes.len() as u64 > self.max_bytes {
            return Err(StoreError::FileTooLarge {
                name: name.to_string(),
                size: bytes.len() as u64,
                limit: self.max_bytes,
            });
        }

        let payload = BASE64.encode(bytes);

        Ok(EncodedMedia {
            mime: mime.to_string(),
            kind: MediaKind::from_mime(mime),
            data_url: format!("data:{};base64,{}", mime, payload),
            size: bytes.len() as u64,
        })
    }
}

/// Display name for a path, for reports and error messages.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
