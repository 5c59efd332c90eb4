//! Alias-based storage adapter resolution.

use crate::adapter::StorageAdapter;
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::info;

/// Maps alias strings to storage adapters, with one default alias.
#[derive(Default)]
pub struct StorageRegistry {
    adapters: HashMap<String, Arc<dyn StorageAdapter>>,
    default_alias: Option<String>,
}

impl StorageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, adapter: Arc<dyn StorageAdapter>, alias: &str, set_default: bool) {
        info!(alias, "registered storage adapter");
        self.adapters.insert(alias.to_string(), adapter);
        if set_default {
            self.default_alias = Some(alias.to_string());
        }
    }

    pub fn get(&self, alias: &str) -> StorageResult<Arc<dyn StorageAdapter>> {
        self.adapters
            .get(alias)
            .cloned()
            .ok_or_else(|| StorageError::UnknownAlias(alias.to_string()))
    }

    pub fn get_default(&self) -> StorageResult<Arc<dyn StorageAdapter>> {
        match &self.default_alias {
            Some(alias) => self.get(alias),
            None => Err(StorageError::UnknownAlias(String::new())),
        }
    }

    pub fn default_alias(&self) -> Option<&str> {
        self.default_alias.as_deref()
    }
}

static GLOBAL: LazyLock<RwLock<StorageRegistry>> =
    LazyLock::new(|| RwLock::new(StorageRegistry::new()));

/// Registers a storage adapter in the process-wide registry (startup-time
/// only).
pub fn add_storage(adapter: Arc<dyn StorageAdapter>, alias: &str, set_default: bool) {
    GLOBAL.write().add(adapter, alias, set_default);
}

/// Resolves an alias from the process-wide registry.
pub fn get_storage(alias: &str) -> StorageResult<Arc<dyn StorageAdapter>> {
    GLOBAL.read().get(alias)
}

/// Resolves the process-wide default storage adapter.
pub fn get_default_storage() -> StorageResult<Arc<dyn StorageAdapter>> {
    GLOBAL.read().get_default()
}
