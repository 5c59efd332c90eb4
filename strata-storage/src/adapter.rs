//! The contract every file storage adapter implements.

use crate::error::StorageResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Metadata about a stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub path: String,
    pub content_type: String,
    pub size: u64,
}

/// Abstract file storage interface: file CRUD plus URL issuance.
///
/// Cloud-provider implementations live in their own crates; records only
/// ever hold file paths, never provider handles.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Stores a file, overwriting any previous content at `path`.
    async fn upload(
        &self,
        path: &str,
        contents: &[u8],
        content_type: &str,
    ) -> StorageResult<FileMetadata>;

    /// Returns the file contents. Fails with `NotFound` when absent.
    async fn download(&self, path: &str) -> StorageResult<Vec<u8>>;

    /// Removes the file. Fails with `NotFound` when absent.
    async fn delete(&self, path: &str) -> StorageResult<()>;

    /// Issues a time-limited access URL for the file.
    async fn get_url(&self, path: &str, expires_in_secs: u64) -> StorageResult<String>;

    /// Lists files whose path starts with `prefix`.
    async fn list(&self, prefix: &str) -> StorageResult<Vec<FileMetadata>>;
}
