//! In-memory file store.

use crate::adapter::{FileMetadata, StorageAdapter};
use crate::error::{StorageError, StorageResult};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

#[derive(Clone)]
struct StoredFile {
    content_type: String,
    contents: Vec<u8>,
}

/// In-memory storage adapter for tests.
#[derive(Default)]
pub struct MockStorageAdapter {
    files: RwLock<HashMap<String, StoredFile>>,
}

impl MockStorageAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_count(&self) -> usize {
        self.files.read().len()
    }
}

#[async_trait]
impl StorageAdapter for MockStorageAdapter {
    async fn upload(
        &self,
        path: &str,
        contents: &[u8],
        content_type: &str,
    ) -> StorageResult<FileMetadata> {
        debug!(%path, size = contents.len(), "storing file");
        self.files.write().insert(
            path.to_string(),
            StoredFile {
                content_type: content_type.to_string(),
                contents: contents.to_vec(),
            },
        );
        Ok(FileMetadata {
            path: path.to_string(),
            content_type: content_type.to_string(),
            size: contents.len() as u64,
        })
    }

    async fn download(&self, path: &str) -> StorageResult<Vec<u8>> {
        self.files
            .read()
            .get(path)
            .map(|f| f.contents.clone())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn delete(&self, path: &str) -> StorageResult<()> {
        self.files
            .write()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn get_url(&self, path: &str, expires_in_secs: u64) -> StorageResult<String> {
        if !self.files.read().contains_key(path) {
            return Err(StorageError::NotFound(path.to_string()));
        }
        Ok(format!("mock://{path}?expires={expires_in_secs}"))
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<FileMetadata>> {
        let files = self.files.read();
        let mut out: Vec<FileMetadata> = files
            .iter()
            .filter(|(path, _)| path.starts_with(prefix))
            .map(|(path, f)| FileMetadata {
                path: path.clone(),
                content_type: f.content_type.clone(),
                size: f.contents.len() as u64,
            })
            .collect();
        out.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(out)
    }
}
