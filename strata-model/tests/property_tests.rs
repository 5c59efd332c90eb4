use serde_json::{json, Value};
use strata_model::{
    HashAlgorithm, ModelError, Property, PropertyDef, StringTransform,
};

fn prop(def: PropertyDef) -> Property {
    Property::from_def(&def)
}

// ── Value lifecycle ──────────────────────────────────────────────

#[test]
fn initializes_unset_and_unchanged() {
    let p = prop(PropertyDef::any("test"));
    assert_eq!(p.name(), "test");
    assert_eq!(p.val(), None);
    assert!(!p.has_changed());
}

#[test]
fn literal_default_resolved_on_read() {
    let p = prop(PropertyDef::any("test").default_value("nothing"));
    assert_eq!(p.val(), Some(json!("nothing")));
}

#[test]
fn producer_default_resolved_on_read() {
    let p = prop(PropertyDef::any("test").default_producer(|| json!("dynamic-default")));
    assert_eq!(p.val(), Some(json!("dynamic-default")));
}

#[test]
fn set_stores_value_and_marks_changed() {
    let mut p = prop(PropertyDef::any("test"));
    p.set(json!("new-value")).unwrap();
    assert_eq!(p.val(), Some(json!("new-value")));
    assert!(p.has_changed());
}

#[test]
fn set_value_overrides_default() {
    let mut p = prop(PropertyDef::number("num").default_value(10));
    p.set(json!(0)).unwrap();
    assert_eq!(p.val(), Some(json!(0)));

    let mut p = prop(PropertyDef::boolean("bool").default_value(true));
    p.set(json!(false)).unwrap();
    assert_eq!(p.val(), Some(json!(false)));

    let mut p = prop(PropertyDef::string("str").default_value("default"));
    p.set(json!("")).unwrap();
    assert_eq!(p.val(), Some(json!("")));
}

#[test]
fn null_clears_value_back_to_default() {
    let mut p = prop(PropertyDef::any("test").default_value("fallback"));
    p.set(json!("explicit")).unwrap();
    p.set(Value::Null).unwrap();
    assert_eq!(p.val(), Some(json!("fallback")));
}

#[test]
fn val_with_transforms_without_mutating() {
    let mut p = prop(PropertyDef::number("test"));
    p.set(json!(10)).unwrap();
    let doubled = p.val_with(|v| json!(v.as_i64().unwrap() * 2));
    assert_eq!(doubled, Some(json!(20)));
    assert_eq!(p.val(), Some(json!(10)));
}

#[test]
fn val_str_case_transforms() {
    let mut p = prop(PropertyDef::string("test"));
    p.set(json!("MixedCase")).unwrap();
    assert_eq!(
        p.val_str(Some(StringTransform::Lowercase)),
        Some("mixedcase".to_string())
    );
    assert_eq!(
        p.val_str(Some(StringTransform::Uppercase)),
        Some("MIXEDCASE".to_string())
    );
    assert_eq!(p.val_str(None), Some("MixedCase".to_string()));
}

#[test]
fn clone_keeps_value_resets_change_flag() {
    let mut p = prop(PropertyDef::any("test"));
    p.set(json!("original")).unwrap();
    assert!(p.has_changed());

    let cloned = p.clone();
    assert_eq!(cloned.name(), p.name());
    assert_eq!(cloned.val(), p.val());
    assert!(!cloned.has_changed());
}

// ── Protected (write-once) ───────────────────────────────────────

#[test]
fn protected_allows_first_explicit_set() {
    let mut p = prop(PropertyDef::any("test").protected().default_value("initial"));
    p.set(json!("first-change")).unwrap();
    assert_eq!(p.val(), Some(json!("first-change")));
}

#[test]
fn protected_rejects_second_set() {
    let mut p = prop(PropertyDef::any("test").protected().default_value("initial"));
    p.set(json!("first-change")).unwrap();

    let err = p.set(json!("second-change")).unwrap_err();
    assert!(err.to_string().contains("protected from change"));
    assert_eq!(p.val(), Some(json!("first-change")));
}

// ── String constraints ───────────────────────────────────────────

#[test]
fn string_length_bounds() {
    let def = PropertyDef::string("test").min_length(2).max_length(5);
    let mut p = prop(def);

    assert!(p.set(json!("a")).is_err());
    assert!(p.set(json!("toolong")).is_err());
    p.set(json!("ok")).unwrap();
    p.set(json!("five5")).unwrap();
}

#[test]
fn string_failure_leaves_prior_value() {
    let mut p = prop(PropertyDef::string("test").max_length(5));
    p.set(json!("short")).unwrap();
    assert!(p.set(json!("much too long")).is_err());
    assert_eq!(p.val(), Some(json!("short")));
}

#[test]
fn string_rejects_digits_when_disallowed() {
    let mut p = prop(PropertyDef::string("test").allow_digits(false));
    let err = p.set(json!("abc123")).unwrap_err();
    assert!(err.to_string().contains("digits are not allowed"));
    p.set(json!("abc")).unwrap();
}

#[test]
fn string_rejects_spaces_when_disallowed() {
    let mut p = prop(PropertyDef::string("test").allow_spaces(false));
    assert!(p.set(json!("a b")).is_err());
    p.set(json!("ab")).unwrap();
}

#[test]
fn string_rejects_letters_when_disallowed() {
    let mut p = prop(PropertyDef::string("test").allow_letters(false));
    assert!(p.set(json!("12a")).is_err());
    p.set(json!("123")).unwrap();
}

#[test]
fn string_rejects_non_string_values() {
    let mut p = prop(PropertyDef::string("test"));
    assert!(matches!(
        p.set(json!(42)),
        Err(ModelError::Validation(_))
    ));
}

// ── Enum constraints ─────────────────────────────────────────────

#[test]
fn enum_accepts_listed_values_only() {
    let values = vec!["Mr".into(), "Miss".into(), "Ms".into(), "Dr".into()];
    let mut p = prop(PropertyDef::enumeration("title", values));

    p.set(json!("Miss")).unwrap();
    let err = p.set(json!("Captain")).unwrap_err();
    assert!(err.to_string().contains("not acceptable"));
    assert_eq!(p.val(), Some(json!("Miss")));
}

#[test]
fn enum_wildcard_accepts_anything() {
    let mut p = prop(PropertyDef::enumeration("tag", vec!["*".into()]));
    p.set(json!("whatever")).unwrap();
    assert_eq!(p.val(), Some(json!("whatever")));
}

// ── Boolean coercion ─────────────────────────────────────────────

#[test]
fn boolean_accepts_and_coerces() {
    let mut p = prop(PropertyDef::boolean("flag"));
    p.set(json!(true)).unwrap();
    assert_eq!(p.val(), Some(json!(true)));

    p.set(json!("false")).unwrap();
    assert_eq!(p.val(), Some(json!(false)));

    assert!(p.set(json!(3)).is_err());
}

// ── Datetime ─────────────────────────────────────────────────────

#[test]
fn datetime_accepts_rfc3339_and_epoch() {
    let mut p = prop(PropertyDef::datetime("born"));
    p.set(json!("1996-12-19T16:39:57-08:00")).unwrap();
    p.set(json!("1996-12-19")).unwrap();
    p.set(json!(851042397000i64)).unwrap();
    assert!(p.set(json!("not a date")).is_err());
}

// ── Hash properties ──────────────────────────────────────────────

#[test]
fn hash_algorithms_match_known_vectors() {
    assert_eq!(
        HashAlgorithm::Sha256.digest("", ""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        HashAlgorithm::Sha1.digest("", ""),
        "da39a3ee5e6b4b0d3255bfef95601890afd80709"
    );
    assert_eq!(
        HashAlgorithm::Md5.digest("", ""),
        "d41d8cd98f00b204e9800998ecf8427e"
    );
}

#[test]
fn hash_never_stores_plaintext() {
    let mut p = prop(PropertyDef::hash("password").salt("pepper"));
    p.set(json!("secret")).unwrap();

    let stored = p.val_str(None).unwrap();
    assert_ne!(stored, "secret");
    assert_eq!(stored, HashAlgorithm::Sha256.digest("pepper", "secret"));
}

#[test]
fn hash_compare_round_trip() {
    let mut p = prop(PropertyDef::hash("password").salt("pepper"));
    p.set(json!("secret")).unwrap();

    assert!(p.compare("secret"));
    assert!(!p.compare("wrong"));
}

#[test]
fn hash_length_rules_apply_to_plain_input() {
    // Bounds constrain the clear text; the stored digest is longer than the
    // maximum and must not be re-validated.
    let mut p = prop(PropertyDef::hash("password").min_length(5).max_length(20));
    assert!(p.set(json!("shrt")).is_err());
    p.set(json!("long enough")).unwrap();
    assert_eq!(p.val_str(None).unwrap().len(), 64);
}

#[test]
fn compare_on_non_hash_property_is_false() {
    let mut p = prop(PropertyDef::string("name"));
    p.set(json!("plain")).unwrap();
    assert!(!p.compare("plain"));
}
