//! Declarative record schemas.
//!
//! A [`Schema`] is an ordered list of [`PropertyDef`] descriptors. Order is
//! declaration order and survives merging: when a derived schema redeclares a
//! base field, the override lands at the base entry's position.

use crate::error::{ModelError, ModelResult};
use crate::object::DataObject;
use crate::property::{
    ChangeHook, DefaultValue, EnumConstraints, HashAlgorithm, HashConstraints, PropertyKind,
    StringConstraints,
};
use crate::status::Status;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// One schema entry: a property's name, kind, and configuration.
#[derive(Clone)]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    pub default: Option<DefaultValue>,
    pub mandatory: bool,
    pub protected: bool,
    pub on_change: Option<ChangeHook>,
}

impl PropertyDef {
    fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            mandatory: false,
            protected: false,
            on_change: None,
        }
    }

    /// Shorthand for an untyped value cell.
    pub fn any(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::Any)
    }

    /// Shorthand for a boolean field.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::Boolean)
    }

    /// Shorthand for a numeric field.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::Number)
    }

    /// Shorthand for a string field with default constraints.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::String(StringConstraints::default()))
    }

    /// Shorthand for an enum field with a fixed allow-list.
    pub fn enumeration(name: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(name, PropertyKind::Enum(EnumConstraints::new(values)))
    }

    /// Shorthand for a hash field (sha256, no salt).
    pub fn hash(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::Hash(HashConstraints::default()))
    }

    /// Shorthand for a datetime field.
    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::DateTime)
    }

    /// Shorthand for a single-record reference field.
    pub fn object(name: impl Into<String>, instance_of: impl Into<String>) -> Self {
        Self::new(
            name,
            PropertyKind::Object {
                instance_of: instance_of.into(),
            },
        )
    }

    /// Shorthand for a multi-record reference field.
    pub fn collection(name: impl Into<String>, instance_of: impl Into<String>) -> Self {
        Self::new(
            name,
            PropertyKind::Collection {
                instance_of: instance_of.into(),
            },
        )
    }

    /// Shorthand for a plain array field.
    pub fn array(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::Array)
    }

    /// Shorthand for a plain map field.
    pub fn map(name: impl Into<String>) -> Self {
        Self::new(name, PropertyKind::Map)
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Write-once: after the first explicit set, further writes fail.
    pub fn protected(mut self) -> Self {
        self.protected = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Literal(value.into()));
        self
    }

    /// Default resolved by calling a producer at read time.
    pub fn default_producer(mut self, producer: fn() -> Value) -> Self {
        self.default = Some(DefaultValue::Producer(producer));
        self
    }

    /// Hook run after each successful set, with access to the whole record.
    pub fn on_change<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut DataObject) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(hook));
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        if let Some(c) = self.string_constraints_mut() {
            c.min_length = min;
        }
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        if let Some(c) = self.string_constraints_mut() {
            c.max_length = max;
        }
        self
    }

    pub fn allow_spaces(mut self, allow: bool) -> Self {
        if let Some(c) = self.string_constraints_mut() {
            c.allow_spaces = allow;
        }
        self
    }

    pub fn allow_digits(mut self, allow: bool) -> Self {
        if let Some(c) = self.string_constraints_mut() {
            c.allow_digits = allow;
        }
        self
    }

    pub fn allow_letters(mut self, allow: bool) -> Self {
        if let Some(c) = self.string_constraints_mut() {
            c.allow_letters = allow;
        }
        self
    }

    pub fn algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        if let PropertyKind::Hash(h) = &mut self.kind {
            h.algorithm = algorithm;
        }
        self
    }

    pub fn salt(mut self, salt: impl Into<String>) -> Self {
        if let PropertyKind::Hash(h) = &mut self.kind {
            h.salt = salt.into();
        }
        self
    }

    fn string_constraints_mut(&mut self) -> Option<&mut StringConstraints> {
        match &mut self.kind {
            PropertyKind::String(c) => Some(c),
            PropertyKind::Hash(h) => Some(&mut h.string),
            _ => None,
        }
    }
}

impl fmt::Debug for PropertyDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("mandatory", &self.mandatory)
            .field("protected", &self.protected)
            .field("on_change", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}

/// Ordered list of property descriptors defining a record shape.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    defs: Vec<PropertyDef>,
}

impl Schema {
    pub fn new(defs: Vec<PropertyDef>) -> Self {
        Self { defs }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn defs(&self) -> &[PropertyDef] {
        &self.defs
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&PropertyDef> {
        self.defs.iter().find(|d| d.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.defs.iter().position(|d| d.name == name)
    }

    /// Merges a base schema with overrides into a new schema. Same-named
    /// fields are replaced at the base entry's position; new fields append in
    /// their declaration order. Neither input is mutated.
    pub fn merge(base: &Schema, overrides: &Schema) -> Schema {
        let mut defs = base.defs.clone();
        for def in &overrides.defs {
            match defs.iter().position(|d| d.name == def.name) {
                Some(idx) => defs[idx] = def.clone(),
                None => defs.push(def.clone()),
            }
        }
        Schema { defs }
    }

    /// Parses a JSON array of property descriptors, the declarative schema
    /// form. Unknown descriptor keys are ignored; an unrecognized `type` tag
    /// or an object/collection descriptor without `instanceOf` fails fast.
    pub fn from_json(value: &Value) -> ModelResult<Schema> {
        let raws: Vec<RawPropertyDef> = serde_json::from_value(value.clone())?;
        let mut defs = Vec::with_capacity(raws.len());
        for raw in raws {
            defs.push(raw.try_into()?);
        }
        Ok(Schema { defs })
    }
}

impl From<Vec<PropertyDef>> for Schema {
    fn from(defs: Vec<PropertyDef>) -> Self {
        Self::new(defs)
    }
}

/// The shared base schema every business object starts from: a display name
/// and a lifecycle status.
pub fn base_properties() -> Schema {
    Schema::new(vec![
        PropertyDef::string("name")
            .mandatory()
            .min_length(1)
            .max_length(100),
        PropertyDef::enumeration("status", Status::values())
            .default_value(Status::Created.as_str()),
    ])
}

/// Raw JSON descriptor, pre-validation. Extra keys (display hints etc.) are
/// accepted and ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPropertyDef {
    name: String,
    #[serde(rename = "type")]
    type_tag: String,
    #[serde(default)]
    mandatory: bool,
    #[serde(default)]
    protected: bool,
    default_value: Option<Value>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    allow_spaces: Option<bool>,
    allow_digits: Option<bool>,
    allow_letters: Option<bool>,
    values: Option<Vec<String>>,
    algorithm: Option<HashAlgorithm>,
    salt: Option<String>,
    instance_of: Option<String>,
}

impl RawPropertyDef {
    fn string_constraints(&self) -> StringConstraints {
        let defaults = StringConstraints::default();
        StringConstraints {
            min_length: self.min_length.unwrap_or(0),
            max_length: self.max_length.unwrap_or(0),
            allow_spaces: self.allow_spaces.unwrap_or(defaults.allow_spaces),
            allow_digits: self.allow_digits.unwrap_or(defaults.allow_digits),
            allow_letters: self.allow_letters.unwrap_or(defaults.allow_letters),
        }
    }

    fn instance_of(&self) -> ModelResult<String> {
        self.instance_of
            .clone()
            .ok_or_else(|| ModelError::MissingField {
                property: self.name.clone(),
                field: "instanceOf".to_string(),
            })
    }
}

impl TryFrom<RawPropertyDef> for PropertyDef {
    type Error = ModelError;

    fn try_from(raw: RawPropertyDef) -> Result<Self, Self::Error> {
        let kind = match raw.type_tag.as_str() {
            "any" => PropertyKind::Any,
            "boolean" => PropertyKind::Boolean,
            "number" => PropertyKind::Number,
            "string" => PropertyKind::String(raw.string_constraints()),
            "enum" => PropertyKind::Enum(EnumConstraints::new(
                raw.values.clone().unwrap_or_default(),
            )),
            "hash" => PropertyKind::Hash(HashConstraints {
                algorithm: raw.algorithm.unwrap_or(HashAlgorithm::Sha256),
                salt: raw.salt.clone().unwrap_or_default(),
                string: raw.string_constraints(),
            }),
            "datetime" => PropertyKind::DateTime,
            "object" => PropertyKind::Object {
                instance_of: raw.instance_of()?,
            },
            "collection" => PropertyKind::Collection {
                instance_of: raw.instance_of()?,
            },
            "array" => PropertyKind::Array,
            "map" => PropertyKind::Map,
            other => return Err(ModelError::UnknownType(other.to_string())),
        };

        Ok(PropertyDef {
            name: raw.name,
            kind,
            default: raw.default_value.map(DefaultValue::Literal),
            mandatory: raw.mandatory,
            protected: raw.protected,
            on_change: None,
        })
    }
}
