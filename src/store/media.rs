//! Uploaded media storage.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::Local;
use uuid::Uuid;

use crate::error::StoreError;

use super::content::validate_key;

/// Filename browsers assign to pasted clipboard images. Uploads with this
/// name get a timestamped name instead so successive pastes don't collide
/// on a single generic name.
pub const BROWSER_DEFAULT_NAME: &str = "image.png";

/// Result of storing an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Final filename within the media directory
    pub filename: String,

    /// URL under which the file is served back
    pub url: String,
}

/// Filesystem-backed store for uploaded media.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Create a store rooted at `root`. The directory is created on first
    /// upload.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store uploaded bytes under a collision-free name derived from the
    /// client-supplied one. Returns the final filename and the URL it is
    /// served from.
    pub async fn store(&self, bytes: &[u8], name: &str) -> Result<StoredMedia, StoreError> {
        let requested = if name == BROWSER_DEFAULT_NAME {
            format!("{}.png", Local::now().format("%Y%m%d-%H%M"))
        } else {
            name.to_string()
        };
        validate_key(&requested)?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {e}", self.root.display())))?;

        let (stem, ext) = split_name(&requested);
        let mut filename = requested.clone();
        while path_exists(&self.root.join(&filename)).await {
            filename = format!("{stem}-{}{ext}", random_suffix());
        }

        let path = self.root.join(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {e}", path.display())))?;

        let url = format!("/api/media?q={}", urlencoding::encode(&filename));
        Ok(StoredMedia { filename, url })
    }

    /// Read stored media bytes back.
    pub async fn open(&self, key: &str) -> Result<Bytes, StoreError> {
        validate_key(key)?;
        let path = self.root.join(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Bytes::from(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(key.to_string()))
            }
            Err(e) => Err(StoreError::Io(format!("{}: {e}", path.display()))),
        }
    }
}

/// Split a filename into stem and extension (extension keeps its dot,
/// defaulting to `.png` when absent).
fn split_name(name: &str) -> (&str, String) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{ext}")),
        _ => (name, ".png".to_string()),
    }
}

fn random_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

async fn path_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

// =============================================================================
// Tests
// =============================================================================
