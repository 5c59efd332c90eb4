//! Business-object facade: a collection name, a schema, and an adapter.

use crate::adapter::BackendAdapter;
use crate::error::BackendResult;
use crate::persisted::PersistedObject;
use crate::query::Query;
use crate::registry;
use serde_json::{Map, Value};
use std::sync::Arc;
use strata_model::{DataObject, ObjectUri, Schema};

/// Source a [`Model::factory`] call builds from.
pub enum ModelSource {
    /// Load the record at this identity from the backend.
    Uri(ObjectUri),
    /// Load the record at this `collection/id` (or bare id) path.
    Path(String),
    /// Build a fresh unsaved record from raw data.
    Data(Map<String, Value>),
}

/// Factory for persisted objects of one collection.
///
/// Holds the schema and the adapter handle; records it builds carry both.
/// Adapter resolution by alias happens here at construction time, never
/// inside the record types.
pub struct Model {
    collection: String,
    schema: Schema,
    backend: Arc<dyn BackendAdapter>,
}

impl Model {
    pub fn new(
        collection: impl Into<String>,
        schema: Schema,
        backend: Arc<dyn BackendAdapter>,
    ) -> Self {
        Self {
            collection: collection.into(),
            schema,
            backend,
        }
    }

    /// Convenience constructor resolving the adapter from the process-wide
    /// registry. `None` resolves the default alias.
    pub fn from_registry(
        collection: impl Into<String>,
        schema: Schema,
        alias: Option<&str>,
    ) -> BackendResult<Self> {
        let backend = match alias {
            Some(alias) => registry::get_backend(alias)?,
            None => registry::get_default_backend()?,
        };
        Ok(Self::new(collection, schema, backend))
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn backend(&self) -> &Arc<dyn BackendAdapter> {
        &self.backend
    }

    fn dao(&self) -> BackendResult<DataObject> {
        Ok(DataObject::factory(
            &self.schema,
            Some(ObjectUri::new(&self.collection)),
        )?)
    }

    /// An empty, schema-valid, transient record.
    pub fn blank(&self) -> BackendResult<PersistedObject> {
        Ok(PersistedObject::new(self.dao()?, self.backend.clone()))
    }

    /// A fresh unsaved record populated from raw data. The identity slot is
    /// prepared (collection set) but no id is assigned until `save`.
    pub fn from_object(&self, data: &Map<String, Value>) -> BackendResult<PersistedObject> {
        let mut obj = self.blank()?;
        obj.populate(data)?;
        Ok(obj)
    }

    /// Loads and populates the record at `path`, which may be a bare id or a
    /// full `collection/id` path.
    pub async fn from_backend(&self, path: &str) -> BackendResult<PersistedObject> {
        let full = if path.contains(ObjectUri::DEFAULT) {
            path.to_string()
        } else {
            format!("{}{}{}", self.collection, ObjectUri::DEFAULT, path)
        };
        let uri = ObjectUri::parse(&full)?;
        self.load(uri).await
    }

    /// Builds from any source: identity → backend read, data → fresh unsaved
    /// instance, nothing → blank record.
    pub async fn factory(&self, src: Option<ModelSource>) -> BackendResult<PersistedObject> {
        match src {
            None => self.blank(),
            Some(ModelSource::Data(data)) => self.from_object(&data),
            Some(ModelSource::Path(path)) => self.from_backend(&path).await,
            Some(ModelSource::Uri(uri)) => self.load(uri).await,
        }
    }

    /// A query builder targeting this collection.
    pub fn query(&self) -> BackendResult<Query> {
        Ok(Query::new(self.dao()?, self.backend.clone()))
    }

    async fn load(&self, uri: ObjectUri) -> BackendResult<PersistedObject> {
        let dao = DataObject::factory(&self.schema, Some(uri))?;
        let mut obj = PersistedObject::new(dao, self.backend.clone());
        obj.read().await?;
        Ok(obj)
    }
}
