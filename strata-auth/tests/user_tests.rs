use serde_json::{json, Map, Value};
use strata_auth::user_properties;
use strata_model::{DataObject, HashAlgorithm};

fn data(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn schema_keeps_base_fields_first() {
    let schema = user_properties();
    assert_eq!(schema.position("name"), Some(0));
    assert_eq!(schema.position("status"), Some(1));
    assert!(schema.position("firstname") > Some(1));
    assert!(schema.get("password").is_some());
}

#[test]
fn name_is_composed_from_first_and_last() {
    let mut dao = DataObject::factory(&user_properties(), None).unwrap();
    dao.populate(&data(&[
        ("firstname", json!("John")),
        ("lastname", json!("Doe")),
        ("email", json!("john@doe.com")),
        ("password", json!("secret123")),
    ]))
    .unwrap();

    assert_eq!(dao.val("name"), Some(json!("John Doe")));

    dao.set("lastname", json!("Smith")).unwrap();
    assert_eq!(dao.val("name"), Some(json!("John Smith")));
}

#[test]
fn password_is_stored_as_digest() {
    let mut dao = DataObject::factory(&user_properties(), None).unwrap();
    dao.set("password", json!("secret123")).unwrap();

    let stored = dao.val("password").unwrap();
    assert_eq!(
        stored,
        json!(HashAlgorithm::Sha256.digest("", "secret123"))
    );
    assert!(dao.get("password").unwrap().compare("secret123"));
    assert!(!dao.get("password").unwrap().compare("wrong"));
}

#[test]
fn password_length_applies_to_clear_text() {
    let mut dao = DataObject::factory(&user_properties(), None).unwrap();
    assert!(dao.set("password", json!("shrt")).is_err());
    assert!(dao
        .set("password", json!("way too long to be a password"))
        .is_err());
}

#[test]
fn hydration_keeps_stored_digest() {
    let digest = HashAlgorithm::Sha256.digest("", "secret123");
    let mut dao = DataObject::factory(&user_properties(), None).unwrap();
    dao.hydrate(&data(&[
        ("firstname", json!("John")),
        ("lastname", json!("Doe")),
        ("password", json!(digest.clone())),
    ]))
    .unwrap();

    assert_eq!(dao.val("password"), Some(json!(digest)));
    assert!(dao.get("password").unwrap().compare("secret123"));
}

#[test]
fn gender_is_a_closed_enum() {
    let mut dao = DataObject::factory(&user_properties(), None).unwrap();
    dao.set("gender", json!("nonbinary")).unwrap();
    assert!(dao.set("gender", json!("other")).is_err());
}
