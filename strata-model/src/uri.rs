//! Record identity: collection + unique id.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of a record in a backend: a collection name and an optional
/// unique id. An absent id denotes a record that has not been persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectUri {
    collection: String,
    id: Option<String>,
}

impl ObjectUri {
    /// Separator between collection and id in the canonical path form.
    pub const DEFAULT: char = '/';

    /// Creates an unassigned identity in the given collection.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: None,
        }
    }

    /// Creates a fully assigned identity.
    pub fn with_id(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: Some(id.into()),
        }
    }

    /// Parses a `collection/id` path. A bare collection name yields an
    /// unassigned identity.
    pub fn parse(path: &str) -> ModelResult<Self> {
        let trimmed = path.trim_matches(Self::DEFAULT);
        if trimmed.is_empty() {
            return Err(ModelError::Validation("empty object path".to_string()));
        }
        match trimmed.split_once(Self::DEFAULT) {
            Some((collection, id)) => Ok(Self::with_id(collection, id)),
            None => Ok(Self::new(trimmed)),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_collection(&mut self, collection: impl Into<String>) {
        self.collection = collection.into();
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Drops the id, returning the identity to the unassigned state.
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    /// True once both collection and id are set.
    pub fn is_assigned(&self) -> bool {
        !self.collection.is_empty() && self.id.is_some()
    }

    /// Canonical `collection/id` path. Unassigned identities render as the
    /// bare collection name.
    pub fn path(&self) -> String {
        match &self.id {
            Some(id) => format!("{}{}{}", self.collection, Self::DEFAULT, id),
            None => self.collection.clone(),
        }
    }

    /// The minimal reference descriptor for embedding in other records.
    pub fn to_reference(&self) -> ObjectReference {
        ObjectReference {
            collection: self.collection.clone(),
            id: self.id.clone().unwrap_or_default(),
            path: self.path(),
        }
    }
}

impl fmt::Display for ObjectUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for ObjectUri {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Minimal `{collection, id}` descriptor standing in for a full record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectReference {
    pub collection: String,
    pub id: String,
    pub path: String,
}

impl ObjectReference {
    pub fn uri(&self) -> ObjectUri {
        ObjectUri::with_id(&self.collection, &self.id)
    }
}
