//! Typed, validated, change-tracked value cells.
//!
//! A [`Property`] holds one field's current value together with its
//! validation rules and mutation history. The supported kinds form a closed
//! set ([`PropertyKind`]); each variant carries its own constraint payload,
//! so an exhaustive match replaces runtime type-tag dispatch.

use crate::error::{ModelError, ModelResult};
use crate::object::DataObject;
use crate::schema::PropertyDef;
use md5::Md5;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;

/// Side-effect hook invoked after a successful `set`, with mutable access to
/// the owning record. Used for computed fields that derive from siblings.
pub type ChangeHook = Arc<dyn Fn(&mut DataObject) + Send + Sync>;

/// Case transforms applicable when reading a string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringTransform {
    Uppercase,
    Lowercase,
}

/// Digest algorithms supported by hash-typed properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
}

impl HashAlgorithm {
    /// Hex digest of `salt + plain`.
    pub fn digest(&self, salt: &str, plain: &str) -> String {
        let input = format!("{salt}{plain}");
        match self {
            HashAlgorithm::Md5 => hex::encode(Md5::digest(input.as_bytes())),
            HashAlgorithm::Sha1 => hex::encode(Sha1::digest(input.as_bytes())),
            HashAlgorithm::Sha256 => hex::encode(Sha256::digest(input.as_bytes())),
        }
    }
}

/// Validation rules for string-typed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringConstraints {
    /// Minimum accepted length, 0 for no bound.
    pub min_length: usize,
    /// Maximum accepted length, 0 for no bound.
    pub max_length: usize,
    pub allow_spaces: bool,
    pub allow_digits: bool,
    pub allow_letters: bool,
}

impl Default for StringConstraints {
    fn default() -> Self {
        Self {
            min_length: 0,
            max_length: 0,
            allow_spaces: true,
            allow_digits: true,
            allow_letters: true,
        }
    }
}

/// Allow-list for enum-typed values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumConstraints {
    pub values: Vec<String>,
}

impl EnumConstraints {
    /// Sentinel accepting any value when present in `values`.
    pub const WILDCARD: &'static str = "*";

    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    fn accepts(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == Self::WILDCARD || v == value)
    }
}

/// Configuration for hash-typed properties. The string constraints apply to
/// the plain input before hashing; the stored digest is never re-validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashConstraints {
    pub algorithm: HashAlgorithm,
    pub salt: String,
    pub string: StringConstraints,
}

impl Default for HashConstraints {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Sha256,
            salt: String::new(),
            string: StringConstraints::default(),
        }
    }
}

/// The closed set of property kinds, each carrying its validation payload.
#[derive(Debug, Clone)]
pub enum PropertyKind {
    Any,
    Boolean,
    Number,
    String(StringConstraints),
    Enum(EnumConstraints),
    Hash(HashConstraints),
    DateTime,
    /// Reference to a single record of the named collection.
    Object { instance_of: String },
    /// References to multiple records of the named collection.
    Collection { instance_of: String },
    Array,
    Map,
}

impl PropertyKind {
    /// The declarative type tag used in JSON schema descriptors.
    pub fn tag(&self) -> &'static str {
        match self {
            PropertyKind::Any => "any",
            PropertyKind::Boolean => "boolean",
            PropertyKind::Number => "number",
            PropertyKind::String(_) => "string",
            PropertyKind::Enum(_) => "enum",
            PropertyKind::Hash(_) => "hash",
            PropertyKind::DateTime => "datetime",
            PropertyKind::Object { .. } => "object",
            PropertyKind::Collection { .. } => "collection",
            PropertyKind::Array => "array",
            PropertyKind::Map => "map",
        }
    }
}

/// A default value: either a literal or a zero-argument producer resolved at
/// read time.
#[derive(Debug, Clone)]
pub enum DefaultValue {
    Literal(Value),
    Producer(fn() -> Value),
}

impl DefaultValue {
    pub fn resolve(&self) -> Value {
        match self {
            DefaultValue::Literal(v) => v.clone(),
            DefaultValue::Producer(f) => f(),
        }
    }
}

/// A single named, typed, validated value cell with change tracking.
pub struct Property {
    name: String,
    kind: PropertyKind,
    value: Option<Value>,
    default: Option<DefaultValue>,
    mandatory: bool,
    protected: bool,
    has_changed: bool,
    on_change: Option<ChangeHook>,
}

impl Property {
    /// Builds a property from its schema descriptor, value unset.
    pub fn from_def(def: &PropertyDef) -> Self {
        Self {
            name: def.name.clone(),
            kind: def.kind.clone(),
            value: None,
            default: def.default.clone(),
            mandatory: def.mandatory,
            protected: def.protected,
            has_changed: false,
            on_change: def.on_change.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    pub fn is_protected(&self) -> bool {
        self.protected
    }

    pub fn has_changed(&self) -> bool {
        self.has_changed
    }

    pub(crate) fn reset_changed(&mut self) {
        self.has_changed = false;
    }

    pub(crate) fn change_hook(&self) -> Option<&ChangeHook> {
        self.on_change.as_ref()
    }

    /// Copy of this property's configuration with no value set.
    pub(crate) fn cleared(&self) -> Self {
        let mut copy = self.clone();
        copy.value = None;
        copy
    }

    /// Validates and stores a value, marking the property changed.
    pub fn set(&mut self, value: Value) -> ModelResult<()> {
        self.set_with(value, true)
    }

    /// Validates and stores a value. On failure the prior value is left in
    /// place. `Null` clears the value, falling back to the default on read.
    pub fn set_with(&mut self, value: Value, mark_changed: bool) -> ModelResult<()> {
        if self.protected && self.value.is_some() {
            return Err(ModelError::Validation(format!(
                "property '{}' is protected from change",
                self.name
            )));
        }
        if value.is_null() {
            self.value = None;
            self.has_changed = mark_changed;
            return Ok(());
        }
        let stored = self.validate(value)?;
        self.value = Some(stored);
        self.has_changed = mark_changed;
        Ok(())
    }

    /// Stores a value coming back from a backend record. Identical to
    /// [`set`](Self::set) except for hash-typed properties, whose stored
    /// digest is adopted verbatim instead of being hashed a second time.
    pub fn hydrate(&mut self, value: Value) -> ModelResult<()> {
        if let PropertyKind::Hash(_) = &self.kind {
            if value.is_null() {
                self.value = None;
            } else {
                let digest = expect_str(&self.name, &value)?;
                self.value = Some(Value::String(digest.to_string()));
            }
            self.has_changed = true;
            return Ok(());
        }
        self.set(value)
    }

    /// Current value, or the resolved default when unset.
    pub fn val(&self) -> Option<Value> {
        match &self.value {
            Some(v) => Some(v.clone()),
            None => self.default.as_ref().map(DefaultValue::resolve),
        }
    }

    /// Current value post-processed by a transform; stored state is untouched.
    pub fn val_with<F: FnOnce(Value) -> Value>(&self, transform: F) -> Option<Value> {
        self.val().map(transform)
    }

    /// String view of the value with an optional case transform.
    pub fn val_str(&self, transform: Option<StringTransform>) -> Option<String> {
        let value = self.val()?;
        let s = value.as_str()?;
        Some(match transform {
            Some(StringTransform::Uppercase) => s.to_uppercase(),
            Some(StringTransform::Lowercase) => s.to_lowercase(),
            None => s.to_string(),
        })
    }

    /// Hash kind only: true iff hashing `plain` with the configured
    /// algorithm and salt reproduces the stored digest.
    pub fn compare(&self, plain: &str) -> bool {
        match (&self.kind, &self.value) {
            (PropertyKind::Hash(c), Some(Value::String(digest))) => {
                c.algorithm.digest(&c.salt, plain) == *digest
            }
            _ => false,
        }
    }

    fn validate(&self, value: Value) -> ModelResult<Value> {
        match &self.kind {
            PropertyKind::Any => Ok(value),
            PropertyKind::Boolean => coerce_bool(&self.name, value),
            PropertyKind::Number => {
                if value.is_number() {
                    Ok(value)
                } else {
                    Err(ModelError::Validation(format!(
                        "{}: value is not a number",
                        self.name
                    )))
                }
            }
            PropertyKind::String(c) => {
                let s = expect_str(&self.name, &value)?;
                check_string(&self.name, c, s)?;
                Ok(value)
            }
            PropertyKind::Enum(c) => {
                let s = expect_str(&self.name, &value)?;
                if c.accepts(s) {
                    Ok(value)
                } else {
                    Err(ModelError::Validation(format!(
                        "value '{}' is not acceptable, acceptable values are: {}",
                        s,
                        c.values.join(", ")
                    )))
                }
            }
            PropertyKind::Hash(c) => {
                let plain = expect_str(&self.name, &value)?;
                check_string(&self.name, &c.string, plain)?;
                Ok(Value::String(c.algorithm.digest(&c.salt, plain)))
            }
            PropertyKind::DateTime => check_datetime(&self.name, value),
            PropertyKind::Object { instance_of } => {
                check_reference(&self.name, instance_of, &value)?;
                Ok(value)
            }
            PropertyKind::Collection { instance_of } => {
                match value.as_array() {
                    Some(items) => {
                        for item in items {
                            check_reference(&self.name, instance_of, item)?;
                        }
                    }
                    None => {
                        return Err(ModelError::Validation(format!(
                            "{}: value is not a collection",
                            self.name
                        )))
                    }
                }
                Ok(value)
            }
            PropertyKind::Array => {
                if value.is_array() {
                    Ok(value)
                } else {
                    Err(ModelError::Validation(format!(
                        "{}: value is not an array",
                        self.name
                    )))
                }
            }
            PropertyKind::Map => {
                if value.is_object() {
                    Ok(value)
                } else {
                    Err(ModelError::Validation(format!(
                        "{}: value is not a map",
                        self.name
                    )))
                }
            }
        }
    }
}

impl Clone for Property {
    /// Independent copy with the same configuration and current value; the
    /// change flag is reset on the clone.
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind.clone(),
            value: self.value.clone(),
            default: self.default.clone(),
            mandatory: self.mandatory,
            protected: self.protected,
            has_changed: false,
            on_change: self.on_change.clone(),
        }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("kind", &self.kind.tag())
            .field("value", &self.value)
            .field("mandatory", &self.mandatory)
            .field("protected", &self.protected)
            .field("has_changed", &self.has_changed)
            .finish_non_exhaustive()
    }
}

fn expect_str<'a>(name: &str, value: &'a Value) -> ModelResult<&'a str> {
    value.as_str().ok_or_else(|| {
        ModelError::Validation(format!("{name}: value is not a string"))
    })
}

fn coerce_bool(name: &str, value: Value) -> ModelResult<Value> {
    match &value {
        Value::Bool(_) => Ok(value),
        Value::String(s) if s == "true" => Ok(Value::Bool(true)),
        Value::String(s) if s == "false" => Ok(Value::Bool(false)),
        _ => Err(ModelError::Validation(format!(
            "{name}: value is not a boolean"
        ))),
    }
}

fn check_string(name: &str, c: &StringConstraints, s: &str) -> ModelResult<()> {
    if !c.allow_digits && s.chars().any(|ch| ch.is_ascii_digit()) {
        return Err(ModelError::Validation(format!(
            "{name}: digits are not allowed in value"
        )));
    }
    if !c.allow_spaces && s.chars().any(char::is_whitespace) {
        return Err(ModelError::Validation(format!(
            "{name}: spaces are not allowed in value"
        )));
    }
    if !c.allow_letters && s.chars().any(char::is_alphabetic) {
        return Err(ModelError::Validation(format!(
            "{name}: letters are not allowed in value"
        )));
    }
    let length = s.chars().count();
    if c.min_length > 0 && length < c.min_length {
        return Err(ModelError::Validation(format!(
            "{name}: value is too short"
        )));
    }
    if c.max_length > 0 && length > c.max_length {
        return Err(ModelError::Validation(format!(
            "{name}: value '{s}' is too long"
        )));
    }
    Ok(())
}

fn check_datetime(name: &str, value: Value) -> ModelResult<Value> {
    match &value {
        // Epoch milliseconds pass through untouched.
        Value::Number(_) => Ok(value),
        Value::String(s) => {
            if chrono::DateTime::parse_from_rfc3339(s).is_ok()
                || chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
            {
                Ok(value)
            } else {
                Err(ModelError::Validation(format!(
                    "{name}: value '{s}' is not a valid datetime"
                )))
            }
        }
        _ => Err(ModelError::Validation(format!(
            "{name}: value is not a valid datetime"
        ))),
    }
}

fn check_reference(name: &str, instance_of: &str, value: &Value) -> ModelResult<()> {
    let obj = value.as_object().ok_or_else(|| {
        ModelError::Validation(format!("{name}: value is not an object reference"))
    })?;
    if let Some(Value::String(collection)) = obj.get("collection") {
        if collection != instance_of {
            return Err(ModelError::Validation(format!(
                "{name}: reference to '{collection}' where '{instance_of}' is expected"
            )));
        }
    }
    Ok(())
}
