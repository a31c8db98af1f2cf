//! ObjectStore trait definition.

use nirogya_types::error::StorageError;

/// Read/write access to raw uploaded file bytes, addressed by storage path.
///
/// Implementations live in nirogya-infra (e.g., `LocalObjectStore`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ObjectStore: Send + Sync {
    /// Fetch the bytes stored at `path`.
    fn fetch(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, StorageError>> + Send;

    /// Store `bytes` at `path`, creating parent directories as needed.
    fn put(
        &self,
        path: &str,
        bytes: &[u8],
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;
}
