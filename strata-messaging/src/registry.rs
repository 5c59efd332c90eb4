//! Alias-based messager and queue resolution.

use crate::adapter::{MessagingAdapter, QueueAdapter};
use crate::error::{MessagingError, MessagingResult, QueueError, QueueResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::info;

/// Maps alias strings to messaging adapters, with one default alias.
#[derive(Default)]
pub struct MessagingRegistry {
    adapters: HashMap<String, Arc<dyn MessagingAdapter>>,
    default_alias: Option<String>,
}

impl MessagingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, adapter: Arc<dyn MessagingAdapter>, alias: &str, set_default: bool) {
        info!(alias, "registered messaging adapter");
        self.adapters.insert(alias.to_string(), adapter);
        if set_default {
            self.default_alias = Some(alias.to_string());
        }
    }

    pub fn get(&self, alias: &str) -> MessagingResult<Arc<dyn MessagingAdapter>> {
        self.adapters
            .get(alias)
            .cloned()
            .ok_or_else(|| MessagingError::UnknownAlias(alias.to_string()))
    }

    pub fn get_default(&self) -> MessagingResult<Arc<dyn MessagingAdapter>> {
        match &self.default_alias {
            Some(alias) => self.get(alias),
            None => Err(MessagingError::UnknownAlias(String::new())),
        }
    }
}

/// Maps alias strings to queue adapters, with one default alias.
#[derive(Default)]
pub struct QueueRegistry {
    adapters: HashMap<String, Arc<dyn QueueAdapter>>,
    default_alias: Option<String>,
}

impl QueueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, adapter: Arc<dyn QueueAdapter>, alias: &str, set_default: bool) {
        info!(alias, "registered queue adapter");
        self.adapters.insert(alias.to_string(), adapter);
        if set_default {
            self.default_alias = Some(alias.to_string());
        }
    }

    pub fn get(&self, alias: &str) -> QueueResult<Arc<dyn QueueAdapter>> {
        self.adapters
            .get(alias)
            .cloned()
            .ok_or_else(|| QueueError::UnknownAlias(alias.to_string()))
    }

    pub fn get_default(&self) -> QueueResult<Arc<dyn QueueAdapter>> {
        match &self.default_alias {
            Some(alias) => self.get(alias),
            None => Err(QueueError::UnknownAlias(String::new())),
        }
    }
}

static MESSAGERS: LazyLock<RwLock<MessagingRegistry>> =
    LazyLock::new(|| RwLock::new(MessagingRegistry::new()));

static QUEUES: LazyLock<RwLock<QueueRegistry>> =
    LazyLock::new(|| RwLock::new(QueueRegistry::new()));

/// Registers a messaging adapter in the process-wide registry.
pub fn add_messager(adapter: Arc<dyn MessagingAdapter>, alias: &str, set_default: bool) {
    MESSAGERS.write().add(adapter, alias, set_default);
}

/// Resolves a messager alias from the process-wide registry.
pub fn get_messager(alias: &str) -> MessagingResult<Arc<dyn MessagingAdapter>> {
    MESSAGERS.read().get(alias)
}

/// Registers a queue adapter in the process-wide registry.
pub fn add_queue(adapter: Arc<dyn QueueAdapter>, alias: &str, set_default: bool) {
    QUEUES.write().add(adapter, alias, set_default);
}

/// Resolves a queue alias from the process-wide registry.
pub fn get_queue(alias: &str) -> QueueResult<Arc<dyn QueueAdapter>> {
    QUEUES.read().get(alias)
}
