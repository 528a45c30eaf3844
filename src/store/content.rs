//! The document content store.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::error::StoreError;

/// Key under which the deck document is stored by default.
pub const DEFAULT_DOCUMENT_KEY: &str = "content.md";

/// Key-value text storage for the deck document.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Read the text stored under `key`. A missing entry reads as the
    /// empty string, not an error.
    async fn read(&self, key: &str) -> Result<String, StoreError>;

    /// Write `text` under `key`, creating the entry if needed.
    async fn write(&self, key: &str, text: &str) -> Result<(), StoreError>;
}

/// Filesystem-backed content store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

/// Reject keys that would escape the data directory.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey("empty key".to_string()));
    }

    let path = Path::new(key);
    let plain = path
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !plain {
        return Err(StoreError::InvalidKey(key.to_string()));
    }

    Ok(())
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn read(&self, key: &str) -> Result<String, StoreError> {
        let path = self.resolve(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(StoreError::Io(format!("{}: {e}", path.display()))),
        }
    }

    async fn write(&self, key: &str, text: &str) -> Result<(), StoreError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(format!("{}: {e}", parent.display())))?;
        }
        tokio::fs::write(&path, text)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {e}", path.display())))
    }
}

// =============================================================================
// Tests
// =============================================================================
