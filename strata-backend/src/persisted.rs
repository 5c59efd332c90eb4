//! A record bound to its backend adapter.

use crate::adapter::BackendAdapter;
use crate::error::{BackendError, BackendResult};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use strata_model::{DataObject, ObjectReference, ObjectUri, Property, Status};
use tracing::debug;

/// A [`DataObject`] paired with the adapter that persists it.
///
/// Owns the persistence state machine: transient (no id) → persisted (id
/// assigned, no pending changes) → deleted (id cleared, or status flipped to
/// the soft-delete sentinel when the adapter is configured for it).
pub struct PersistedObject {
    dao: DataObject,
    backend: Arc<dyn BackendAdapter>,
}

impl PersistedObject {
    pub fn new(dao: DataObject, backend: Arc<dyn BackendAdapter>) -> Self {
        Self { dao, backend }
    }

    pub fn dao(&self) -> &DataObject {
        &self.dao
    }

    pub fn dao_mut(&mut self) -> &mut DataObject {
        &mut self.dao
    }

    pub fn into_dao(self) -> DataObject {
        self.dao
    }

    pub fn backend(&self) -> &Arc<dyn BackendAdapter> {
        &self.backend
    }

    pub fn uri(&self) -> &ObjectUri {
        self.dao.uri()
    }

    pub fn has(&self, key: &str) -> bool {
        self.dao.has(key)
    }

    pub fn get(&self, key: &str) -> BackendResult<&Property> {
        Ok(self.dao.get(key)?)
    }

    pub fn set(&mut self, key: &str, value: Value) -> BackendResult<()> {
        Ok(self.dao.set(key, value)?)
    }

    pub fn val(&self, key: &str) -> Option<Value> {
        self.dao.val(key)
    }

    pub fn populate(&mut self, data: &Map<String, Value>) -> BackendResult<()> {
        Ok(self.dao.populate(data)?)
    }

    pub fn is_persisted(&self) -> bool {
        self.dao.is_persisted()
    }

    pub fn as_reference(&self) -> ObjectReference {
        self.dao.to_reference()
    }

    pub fn to_json(&self, as_references: bool) -> Value {
        self.dao.to_json(as_references)
    }

    /// Populates from the backend record at the assigned identity.
    pub async fn read(&mut self) -> BackendResult<()> {
        if !self.dao.uri().is_assigned() {
            return Err(BackendError::MissingIdentity(
                "read requires an assigned identity".to_string(),
            ));
        }
        self.backend.read(&mut self.dao).await?;
        self.dao.set_persisted(true);
        Ok(())
    }

    /// Creates or updates depending on persistence state, then commits:
    /// identity assigned, all change flags reset.
    pub async fn save(&mut self) -> BackendResult<()> {
        if self.dao.is_persisted() {
            self.backend.update(&mut self.dao).await?;
        } else {
            self.backend.create(&mut self.dao, None).await?;
        }
        self.dao.set_persisted(true);
        debug!(path = %self.dao.uri(), "record saved");
        Ok(())
    }

    /// Removes the record, or flips its status to the deleted sentinel when
    /// the adapter soft-deletes. Hard deletion clears the identity.
    pub async fn delete(&mut self) -> BackendResult<()> {
        if self.backend.soft_delete() {
            self.dao.set("status", json!(Status::Deleted.as_str()))?;
            self.backend.update(&mut self.dao).await?;
            self.dao.set_persisted(true);
        } else {
            self.backend.delete(&mut self.dao).await?;
            self.dao.clear_identity();
        }
        Ok(())
    }
}
