use serde_json::{json, Map, Value};
use strata_model::{DataObject, ModelError, ObjectUri, PropertyDef, Schema};

fn fixture_schema() -> Schema {
    Schema::new(vec![
        PropertyDef::string("name").min_length(1),
        PropertyDef::enumeration(
            "status",
            vec!["created".into(), "active".into()],
        )
        .default_value("created"),
        PropertyDef::boolean("verified").default_value(false),
    ])
}

fn data(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

// ── Factory ──────────────────────────────────────────────────────

#[test]
fn factory_builds_properties_in_schema_order() {
    let dao = DataObject::factory(&fixture_schema(), None).unwrap();
    let names: Vec<&str> = dao.properties().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["name", "status", "verified"]);
    assert!(!dao.is_populated());
    assert!(!dao.is_persisted());
}

#[test]
fn factory_rejects_duplicate_names() {
    let schema = Schema::new(vec![
        PropertyDef::string("name"),
        PropertyDef::number("name"),
    ]);
    let err = DataObject::factory(&schema, None).unwrap_err();
    assert!(matches!(err, ModelError::DuplicateProperty(n) if n == "name"));
}

// ── Field access ─────────────────────────────────────────────────

#[test]
fn accessors_roundtrip_known_fields() {
    let mut dao = DataObject::factory(&fixture_schema(), None).unwrap();
    assert!(dao.has("name"));
    assert!(!dao.has("ghost"));

    dao.set("name", json!("Ada")).unwrap();
    assert_eq!(dao.val("name"), Some(json!("Ada")));
    assert!(dao.get("name").unwrap().has_changed());
}

#[test]
fn unknown_key_access_fails() {
    let mut dao = DataObject::factory(&fixture_schema(), None).unwrap();
    assert!(matches!(
        dao.get("ghost"),
        Err(ModelError::UnknownProperty(_))
    ));
    assert!(matches!(
        dao.set("ghost", json!(1)),
        Err(ModelError::UnknownProperty(_))
    ));
    assert_eq!(dao.val("ghost"), None);
}

#[test]
fn default_values_visible_before_any_set() {
    let dao = DataObject::factory(&fixture_schema(), None).unwrap();
    assert_eq!(dao.val("status"), Some(json!("created")));
    assert_eq!(dao.val("verified"), Some(json!(false)));
}

// ── Populate ─────────────────────────────────────────────────────

#[test]
fn populate_sets_matching_keys_only() {
    let mut dao = DataObject::factory(&fixture_schema(), None).unwrap();
    dao.populate(&data(&[
        ("name", json!("Ada")),
        ("uid", json!("people/1")),
        ("unrelated", json!(42)),
    ]))
    .unwrap();

    assert_eq!(dao.val("name"), Some(json!("Ada")));
    assert!(dao.is_populated());
    // untouched fields keep their defaults
    assert_eq!(dao.val("status"), Some(json!("created")));
}

#[test]
fn populate_runs_change_hooks() {
    let schema = Schema::new(vec![
        PropertyDef::string("name"),
        PropertyDef::string("firstname").on_change(compose_name),
        PropertyDef::string("lastname").on_change(compose_name),
    ]);
    let mut dao = DataObject::factory(&schema, None).unwrap();
    dao.populate(&data(&[
        ("name", json!(" ")),
        ("firstname", json!("John")),
        ("lastname", json!("Doe")),
    ]))
    .unwrap();

    assert_eq!(dao.val("name"), Some(json!("John Doe")));
}

fn compose_name(dao: &mut DataObject) {
    let first = dao.val("firstname").and_then(|v| v.as_str().map(String::from));
    let last = dao.val("lastname").and_then(|v| v.as_str().map(String::from));
    let full = format!(
        "{} {}",
        first.unwrap_or_default(),
        last.unwrap_or_default()
    );
    let _ = dao.set("name", json!(full.trim()));
}

#[test]
fn set_runs_change_hooks() {
    let schema = Schema::new(vec![
        PropertyDef::string("name"),
        PropertyDef::string("firstname").on_change(compose_name),
        PropertyDef::string("lastname").on_change(compose_name),
    ]);
    let mut dao = DataObject::factory(&schema, None).unwrap();
    dao.set("firstname", json!("Ada")).unwrap();
    dao.set("lastname", json!("Lovelace")).unwrap();
    assert_eq!(dao.val("name"), Some(json!("Ada Lovelace")));
}

// ── Persistence state ────────────────────────────────────────────

#[test]
fn committing_persistence_resets_change_flags() {
    let mut dao = DataObject::factory(&fixture_schema(), None).unwrap();
    dao.set("name", json!("changed")).unwrap();
    assert!(!dao.is_persisted());
    assert!(dao.has_changes());

    dao.set_persisted(true);
    assert!(dao.is_persisted());
    assert!(!dao.has_changes());
    assert!(!dao.get("name").unwrap().has_changed());
}

#[test]
fn clearing_identity_returns_to_transient() {
    let mut dao = DataObject::factory(
        &fixture_schema(),
        Some(ObjectUri::with_id("people", "1")),
    )
    .unwrap();
    dao.set_persisted(true);

    dao.clear_identity();
    assert!(!dao.is_persisted());
    assert_eq!(dao.path(), None);
    assert_eq!(dao.uri().collection(), "people");
}

// ── Serialization ────────────────────────────────────────────────

#[test]
fn to_json_emits_resolved_values() {
    let mut dao = DataObject::factory(&fixture_schema(), None).unwrap();
    dao.set("name", json!("Ada")).unwrap();

    let out = dao.to_json(false);
    assert_eq!(out["name"], json!("Ada"));
    assert_eq!(out["status"], json!("created"));
    assert_eq!(out["verified"], json!(false));
}

#[test]
fn to_json_as_references_collapses_nested_objects() {
    let schema = Schema::new(vec![
        PropertyDef::string("name"),
        PropertyDef::object("entity", "entity"),
    ]);
    let mut dao = DataObject::factory(&schema, None).unwrap();
    dao.set("name", json!("Ada")).unwrap();
    dao.set(
        "entity",
        json!({"collection": "entity", "id": "42", "label": "Acme Corp"}),
    )
    .unwrap();

    let refs = dao.to_json(true);
    assert_eq!(
        refs["entity"],
        json!({"collection": "entity", "id": "42", "path": "entity/42"})
    );

    let full = dao.to_json(false);
    assert_eq!(full["entity"]["label"], json!("Acme Corp"));
}

#[test]
fn to_reference_mirrors_identity() {
    let dao = DataObject::factory(
        &fixture_schema(),
        Some(ObjectUri::with_id("people", "abc")),
    )
    .unwrap();
    let reference = dao.to_reference();
    assert_eq!(reference.collection, "people");
    assert_eq!(reference.id, "abc");
    assert_eq!(reference.path, "people/abc");
}

// ── Cloning ──────────────────────────────────────────────────────

#[test]
fn clone_serializes_equal_with_flags_reset() {
    let mut dao = DataObject::factory(
        &fixture_schema(),
        Some(ObjectUri::with_id("people", "1")),
    )
    .unwrap();
    dao.set("name", json!("Ada")).unwrap();
    dao.set("status", json!("active")).unwrap();

    let copy = dao.clone_with(None).unwrap();
    assert_eq!(copy.to_json(false), dao.to_json(false));
    assert!(!copy.has_changes());
    // identity is never shared between two live records
    assert_eq!(copy.path(), None);
}

#[test]
fn clone_applies_overrides_through_validation() {
    let mut dao = DataObject::factory(&fixture_schema(), None).unwrap();
    dao.set("name", json!("Ada")).unwrap();

    let copy = dao
        .clone_with(Some(&data(&[("name", json!("Grace"))])))
        .unwrap();
    assert_eq!(copy.val("name"), Some(json!("Grace")));

    let err = dao.clone_with(Some(&data(&[("name", json!(""))])));
    assert!(err.is_err());
}

#[test]
fn blank_clone_keeps_shape_drops_values() {
    let mut dao = DataObject::factory(
        &fixture_schema(),
        Some(ObjectUri::with_id("people", "1")),
    )
    .unwrap();
    dao.set("name", json!("Ada")).unwrap();

    let blank = dao.blank_clone();
    assert!(blank.has("name"));
    assert_eq!(blank.val("name"), None);
    assert_eq!(blank.uri().collection(), "people");
    assert_eq!(blank.path(), None);
}
