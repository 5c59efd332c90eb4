//! Alias-based adapter resolution.
//!
//! [`BackendRegistry`] is an explicit value passed to whatever needs adapter
//! resolution. The process-wide instance behind [`add_backend`] /
//! [`get_backend`] is a composition-layer convenience only; model types
//! never consult it.

use crate::adapter::BackendAdapter;
use crate::error::{BackendError, BackendResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::info;

/// Maps alias strings to adapter instances, with one alias designated as the
/// default.
#[derive(Default)]
pub struct BackendRegistry {
    adapters: HashMap<String, Arc<dyn BackendAdapter>>,
    default_alias: Option<String>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an adapter under `alias`, overwriting any previous entry.
    pub fn add(&mut self, adapter: Arc<dyn BackendAdapter>, alias: &str, set_default: bool) {
        info!(alias, "registered backend adapter");
        self.adapters.insert(alias.to_string(), adapter);
        if set_default {
            self.default_alias = Some(alias.to_string());
        }
    }

    /// Resolves an alias to its adapter.
    pub fn get(&self, alias: &str) -> BackendResult<Arc<dyn BackendAdapter>> {
        self.adapters
            .get(alias)
            .cloned()
            .ok_or_else(|| BackendError::UnknownAlias(alias.to_string()))
    }

    /// Resolves the default adapter.
    pub fn get_default(&self) -> BackendResult<Arc<dyn BackendAdapter>> {
        match &self.default_alias {
            Some(alias) => self.get(alias),
            None => Err(BackendError::UnknownAlias(String::new())),
        }
    }

    pub fn default_alias(&self) -> Option<&str> {
        self.default_alias.as_deref()
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.adapters.contains_key(alias)
    }
}

static GLOBAL: LazyLock<RwLock<BackendRegistry>> =
    LazyLock::new(|| RwLock::new(BackendRegistry::new()));

/// Registers an adapter in the process-wide registry. Expected to run once
/// at startup, before request handling begins.
pub fn add_backend(adapter: Arc<dyn BackendAdapter>, alias: &str, set_default: bool) {
    GLOBAL.write().add(adapter, alias, set_default);
}

/// Resolves an alias from the process-wide registry.
pub fn get_backend(alias: &str) -> BackendResult<Arc<dyn BackendAdapter>> {
    GLOBAL.read().get(alias)
}

/// Resolves the process-wide default adapter.
pub fn get_default_backend() -> BackendResult<Arc<dyn BackendAdapter>> {
    GLOBAL.read().get_default()
}
