//! The schema-driven record container.

use crate::error::{ModelError, ModelResult};
use crate::property::{Property, PropertyKind};
use crate::schema::Schema;
use crate::uri::{ObjectReference, ObjectUri};
use serde_json::{Map, Value};
use tracing::debug;

/// An ordered collection of [`Property`] cells forming one record, with
/// identity, population state, and persistence state.
///
/// Property order is schema declaration order. Persistence itself lives
/// behind the backend adapter protocol; this type only tracks the state.
#[derive(Debug)]
pub struct DataObject {
    uri: ObjectUri,
    properties: Vec<Property>,
    parent_prop: Option<String>,
    populated: bool,
    persisted: bool,
}

impl DataObject {
    /// Builds one property per schema entry, preserving declaration order.
    /// Duplicate property names are rejected.
    pub fn factory(schema: &Schema, uri: Option<ObjectUri>) -> ModelResult<Self> {
        let mut properties: Vec<Property> = Vec::with_capacity(schema.len());
        for def in schema.defs() {
            if properties.iter().any(|p| p.name() == def.name) {
                return Err(ModelError::DuplicateProperty(def.name.clone()));
            }
            properties.push(Property::from_def(def));
        }
        Ok(Self {
            uri: uri.unwrap_or_default(),
            properties,
            parent_prop: None,
            populated: false,
            persisted: false,
        })
    }

    /// Builds a record with a hierarchical parent relation carried by the
    /// named property.
    pub fn factory_with_parent(
        schema: &Schema,
        uri: Option<ObjectUri>,
        parent_prop: impl Into<String>,
    ) -> ModelResult<Self> {
        let mut dao = Self::factory(schema, uri)?;
        dao.parent_prop = Some(parent_prop.into());
        Ok(dao)
    }

    pub fn uri(&self) -> &ObjectUri {
        &self.uri
    }

    pub fn uri_mut(&mut self) -> &mut ObjectUri {
        &mut self.uri
    }

    pub fn set_uri(&mut self, uri: ObjectUri) {
        self.uri = uri;
    }

    /// Clears the identity, returning the record to the transient state.
    pub fn clear_identity(&mut self) {
        self.uri.clear_id();
        self.persisted = false;
    }

    /// Canonical `collection/id` path, present once the identity is assigned.
    pub fn path(&self) -> Option<String> {
        self.uri.is_assigned().then(|| self.uri.path())
    }

    pub fn parent_prop(&self) -> Option<&str> {
        self.parent_prop.as_deref()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn has(&self, key: &str) -> bool {
        self.properties.iter().any(|p| p.name() == key)
    }

    pub fn get(&self, key: &str) -> ModelResult<&Property> {
        self.properties
            .iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| ModelError::UnknownProperty(key.to_string()))
    }

    pub fn get_mut(&mut self, key: &str) -> ModelResult<&mut Property> {
        self.properties
            .iter_mut()
            .find(|p| p.name() == key)
            .ok_or_else(|| ModelError::UnknownProperty(key.to_string()))
    }

    /// Sets a field through its property's validation, then runs the
    /// property's change hook with the whole record.
    pub fn set(&mut self, key: &str, value: Value) -> ModelResult<()> {
        let idx = self
            .properties
            .iter()
            .position(|p| p.name() == key)
            .ok_or_else(|| ModelError::UnknownProperty(key.to_string()))?;
        self.set_at(idx, value, true)
    }

    /// Field value, or the property's resolved default. `None` for unknown
    /// keys or unset value without a default.
    pub fn val(&self, key: &str) -> Option<Value> {
        self.properties
            .iter()
            .find(|p| p.name() == key)
            .and_then(Property::val)
    }

    /// Sets every property whose name appears in `data`, in schema order.
    /// Unknown keys in `data` are ignored. Marks the record populated.
    pub fn populate(&mut self, data: &Map<String, Value>) -> ModelResult<()> {
        self.populate_from_data(data)
    }

    /// Same contract as [`populate`](Self::populate); kept as the explicit
    /// raw-data entry point used when hydrating from a backend record.
    pub fn populate_from_data(&mut self, data: &Map<String, Value>) -> ModelResult<()> {
        debug!(path = %self.uri, "populating record");
        for idx in 0..self.properties.len() {
            let value = match data.get(self.properties[idx].name()) {
                Some(v) => v.clone(),
                None => continue,
            };
            self.set_at(idx, value, true)?;
        }
        self.populated = true;
        Ok(())
    }

    /// Populates from a stored backend record. Same contract as
    /// [`populate`](Self::populate), except hash-typed properties adopt the
    /// stored digest verbatim rather than hashing it again.
    pub fn hydrate(&mut self, data: &Map<String, Value>) -> ModelResult<()> {
        debug!(path = %self.uri, "hydrating record");
        for idx in 0..self.properties.len() {
            let value = match data.get(self.properties[idx].name()) {
                Some(v) => v.clone(),
                None => continue,
            };
            self.properties[idx].hydrate(value)?;
            if let Some(hook) = self.properties[idx].change_hook().cloned() {
                hook(self);
            }
        }
        self.populated = true;
        Ok(())
    }

    /// True once at least one populate call has completed.
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Commits or clears persistence state. Committing resets every
    /// property's change flag: a persisted record has no pending mutations.
    pub fn set_persisted(&mut self, persisted: bool) {
        self.persisted = persisted;
        if persisted {
            for prop in &mut self.properties {
                prop.reset_changed();
            }
        }
    }

    /// True if any property carries a pending mutation.
    pub fn has_changes(&self) -> bool {
        self.properties.iter().any(Property::has_changed)
    }

    /// Serializes all property values to a JSON map. With `as_references`,
    /// object- and collection-typed values emit their identity reference
    /// instead of nested content.
    pub fn to_json(&self, as_references: bool) -> Value {
        let mut out = Map::new();
        for prop in &self.properties {
            let Some(value) = prop.val() else { continue };
            let value = if as_references {
                match prop.kind() {
                    PropertyKind::Object { .. } => as_reference_value(value),
                    PropertyKind::Collection { .. } => match value {
                        Value::Array(items) => Value::Array(
                            items.into_iter().map(as_reference_value).collect(),
                        ),
                        other => other,
                    },
                    _ => value,
                }
            } else {
                value
            };
            out.insert(prop.name().to_string(), value);
        }
        Value::Object(out)
    }

    /// The minimal reference descriptor for embedding in other records.
    pub fn to_reference(&self) -> ObjectReference {
        self.uri.to_reference()
    }

    /// Deep-independent copy: cloned properties with change flags reset,
    /// identity cleared, overrides applied through `set`.
    pub fn clone_with(&self, overrides: Option<&Map<String, Value>>) -> ModelResult<Self> {
        let mut copy = Self {
            uri: ObjectUri::new(self.uri.collection()),
            properties: self.properties.clone(),
            parent_prop: self.parent_prop.clone(),
            populated: self.populated,
            persisted: false,
        };
        if let Some(data) = overrides {
            for (key, value) in data {
                if copy.has(key) {
                    copy.set(key, value.clone())?;
                }
            }
        }
        Ok(copy)
    }

    /// A fresh record with the same property configuration and identity
    /// collection, but no values and no id. Used by adapters to materialize
    /// query results.
    pub fn blank_clone(&self) -> Self {
        Self {
            uri: ObjectUri::new(self.uri.collection()),
            properties: self.properties.iter().map(Property::cleared).collect(),
            parent_prop: self.parent_prop.clone(),
            populated: false,
            persisted: false,
        }
    }

    fn set_at(&mut self, idx: usize, value: Value, mark_changed: bool) -> ModelResult<()> {
        self.properties[idx].set_with(value, mark_changed)?;
        if let Some(hook) = self.properties[idx].change_hook().cloned() {
            hook(self);
        }
        Ok(())
    }
}

/// Collapses a full nested record value to its identity reference when one
/// can be derived; other values pass through unchanged.
fn as_reference_value(value: Value) -> Value {
    let Some(obj) = value.as_object() else {
        return value;
    };
    if let (Some(Value::String(collection)), Some(Value::String(id))) =
        (obj.get("collection"), obj.get("id"))
    {
        let reference = ObjectUri::with_id(collection, id).to_reference();
        return serde_json::to_value(reference).unwrap_or(value);
    }
    if let Some(Value::String(uid)) = obj.get("uid") {
        if let Ok(uri) = ObjectUri::parse(uid) {
            if uri.is_assigned() {
                return serde_json::to_value(uri.to_reference()).unwrap_or(value);
            }
        }
    }
    value
}
