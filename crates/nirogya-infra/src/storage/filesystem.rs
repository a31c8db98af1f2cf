//! Local filesystem object store.
//!
//! Implements the `ObjectStore` trait from `nirogya-core` with objects laid
//! out under a single root directory, addressed by the same
//! `{user_id}/{file_name}` paths the upload flow writes.

use std::path::{Component, Path, PathBuf};

use nirogya_core::storage::ObjectStore;
use nirogya_types::error::StorageError;

/// Filesystem-backed object store rooted at one directory.
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    /// Create a store rooted at `root`. The directory is created lazily
    /// on the first `put`.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve a storage path under the root.
    ///
    /// Rejects absolute paths and any `..` component so callers cannot
    /// escape the store.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let escapes = relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir));
        if escapes {
            return Err(StorageError::Io(format!("invalid storage path: {path}")));
        }
        Ok(self.root.join(relative))
    }
}

impl ObjectStore for LocalObjectStore {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full = self.resolve(path)?;
        match tokio::fs::read(&full).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(err) => Err(StorageError::Io(err.to_string())),
        }
    }

    async fn put(&self, path: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| StorageError::Io(err.to_string()))?;
        }
        tokio::fs::write(&full, bytes)
            .await
            .map_err(|err| StorageError::Io(err.to_string()))
    }
}
