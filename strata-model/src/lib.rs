//! Core record model for Strata.
//!
//! Defines the schema-driven object types every Strata subsystem depends on:
//! - [`Property`] — a single typed, validated, change-tracked value cell
//! - [`PropertyDef`] / [`Schema`] — declarative record shapes with a pure
//!   inheritance merge
//! - [`DataObject`] — an ordered collection of properties forming one record
//! - [`ObjectUri`] / [`ObjectReference`] — record identity and the minimal
//!   embeddable reference form
//! - [`Status`] — record lifecycle statuses, including the soft-delete
//!   sentinel
//!
//! Persistence is deliberately absent here: records are plain state, and
//! backend adapters operate on them through the protocol defined in
//! `strata-backend`.

mod error;
mod object;
mod property;
mod schema;
mod status;
mod uri;

pub use error::{ModelError, ModelResult};
pub use object::DataObject;
pub use property::{
    ChangeHook, DefaultValue, EnumConstraints, HashAlgorithm, HashConstraints, Property,
    PropertyKind, StringConstraints, StringTransform,
};
pub use schema::{base_properties, PropertyDef, Schema};
pub use status::Status;
pub use uri::{ObjectReference, ObjectUri};
