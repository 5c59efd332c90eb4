//! The account-holder schema.

use serde_json::json;
use strata_model::{base_properties, DataObject, HashAlgorithm, PropertyDef, Schema};

/// Collection user records are persisted under.
pub const USER_COLLECTION: &str = "users";

/// The user record shape: the shared base properties extended with identity
/// and credential fields. `name` is recomputed from `firstname`/`lastname`
/// on every change, so its base length rule is loosened.
pub fn user_properties() -> Schema {
    Schema::merge(
        &base_properties(),
        &Schema::new(vec![
            PropertyDef::string("name").min_length(0).max_length(100),
            PropertyDef::string("firstname")
                .mandatory()
                .min_length(1)
                .max_length(100)
                .on_change(compose_name),
            PropertyDef::string("lastname")
                .mandatory()
                .min_length(1)
                .max_length(100)
                .on_change(compose_name),
            PropertyDef::enumeration(
                "gender",
                vec!["male".into(), "female".into(), "nonbinary".into()],
            ),
            PropertyDef::datetime("birthday"),
            PropertyDef::string("email")
                .mandatory()
                .min_length(1)
                .max_length(100),
            PropertyDef::string("phone").min_length(1).max_length(100),
            // length bounds apply to the clear password, not the digest
            PropertyDef::hash("password")
                .mandatory()
                .algorithm(HashAlgorithm::Sha256)
                .min_length(5)
                .max_length(20),
            PropertyDef::object("entity", "entity"),
        ]),
    )
}

fn compose_name(dao: &mut DataObject) {
    let firstname = dao
        .val("firstname")
        .and_then(|v| v.as_str().map(String::from))
        .unwrap_or_default();
    let lastname = dao
        .val("lastname")
        .and_then(|v| v.as_str().map(String::from))
        .unwrap_or_default();
    let full = format!("{firstname} {lastname}");
    let _ = dao.set("name", json!(full.trim()));
}
