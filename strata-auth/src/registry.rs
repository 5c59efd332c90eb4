//! Alias-based auth provider resolution.

use crate::adapter::AuthAdapter;
use crate::error::{AuthError, AuthResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::info;

/// Maps alias strings to auth adapters, with one default alias.
#[derive(Default)]
pub struct AuthRegistry {
    adapters: HashMap<String, Arc<dyn AuthAdapter>>,
    default_alias: Option<String>,
}

impl AuthRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, adapter: Arc<dyn AuthAdapter>, alias: &str, set_default: bool) {
        info!(alias, "registered auth adapter");
        self.adapters.insert(alias.to_string(), adapter);
        if set_default {
            self.default_alias = Some(alias.to_string());
        }
    }

    pub fn get(&self, alias: &str) -> AuthResult<Arc<dyn AuthAdapter>> {
        self.adapters
            .get(alias)
            .cloned()
            .ok_or_else(|| AuthError::UnknownAlias(alias.to_string()))
    }

    pub fn get_default(&self) -> AuthResult<Arc<dyn AuthAdapter>> {
        match &self.default_alias {
            Some(alias) => self.get(alias),
            None => Err(AuthError::UnknownAlias(String::new())),
        }
    }

    pub fn default_alias(&self) -> Option<&str> {
        self.default_alias.as_deref()
    }
}

static GLOBAL: LazyLock<RwLock<AuthRegistry>> =
    LazyLock::new(|| RwLock::new(AuthRegistry::new()));

/// Registers a provider in the process-wide registry (startup-time only).
pub fn add_auth(adapter: Arc<dyn AuthAdapter>, alias: &str, set_default: bool) {
    GLOBAL.write().add(adapter, alias, set_default);
}

/// Resolves an alias from the process-wide registry.
pub fn get_auth(alias: &str) -> AuthResult<Arc<dyn AuthAdapter>> {
    GLOBAL.read().get(alias)
}

/// Resolves the process-wide default provider.
pub fn get_default_auth() -> AuthResult<Arc<dyn AuthAdapter>> {
    GLOBAL.read().get_default()
}
