use serde_json::{json, Map, Value};
use std::sync::Arc;
use strata_auth::{
    add_auth, get_auth, user_properties, AuthAdapter, AuthError, AuthRegistry, MockAuthAdapter,
    USER_COLLECTION,
};
use strata_model::{DataObject, ObjectUri};

fn user(email: &str) -> DataObject {
    let mut dao = DataObject::factory(
        &user_properties(),
        Some(ObjectUri::new(USER_COLLECTION)),
    )
    .unwrap();
    let mut data = Map::new();
    data.insert("firstname".to_string(), json!("John"));
    data.insert("lastname".to_string(), json!("Doe"));
    data.insert("email".to_string(), json!(email));
    data.insert("password".to_string(), json!("secret123"));
    dao.populate(&data).unwrap();
    dao
}

// ── Registration ─────────────────────────────────────────────────

#[tokio::test]
async fn register_then_conflict() {
    let adapter = MockAuthAdapter::new();
    let mut u = user("john@doe.com");

    adapter.register(&mut u, None).await.unwrap();
    assert_eq!(adapter.registered_count(), 1);

    let err = adapter.register(&mut u, None).await.unwrap_err();
    assert!(matches!(err, AuthError::AlreadyRegistered(login) if login == "john@doe.com"));
}

#[tokio::test]
async fn signup_unknown_user_fails() {
    let adapter = MockAuthAdapter::new();
    let err = adapter.signup("ghost@doe.com", "pw").await.unwrap_err();
    assert!(matches!(err, AuthError::UnknownUser(_)));
}

#[tokio::test]
async fn signup_checks_clear_password_when_known() {
    let adapter = MockAuthAdapter::new();
    let mut u = user("john@doe.com");
    adapter.register(&mut u, Some("secret123")).await.unwrap();

    let err = adapter.signup("john@doe.com", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials(_)));

    let session = adapter.signup("john@doe.com", "secret123").await.unwrap();
    assert!(!session.token.is_empty());
    assert!(!session.refresh_token.is_empty());
}

// ── Token lifecycle ──────────────────────────────────────────────

#[tokio::test]
async fn bearer_token_resolves_to_claims() {
    let adapter = MockAuthAdapter::new();
    let mut u = user("john@doe.com");
    adapter.register(&mut u, None).await.unwrap();
    let session = adapter.signup("john@doe.com", "any").await.unwrap();

    let claims = adapter.get_auth_token(&session.token).await.unwrap();
    assert_eq!(claims["login"], json!("john@doe.com"));

    let err = adapter.get_auth_token("bogus").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken));
}

#[tokio::test]
async fn refresh_rotates_the_pair() {
    let adapter = MockAuthAdapter::new();
    let mut u = user("john@doe.com");
    adapter.register(&mut u, None).await.unwrap();
    let old = adapter.signup("john@doe.com", "any").await.unwrap();

    let fresh = adapter.refresh_token(&old.refresh_token).await.unwrap();
    assert_ne!(fresh.token, old.token);

    // the old pair is dead
    assert!(adapter.get_auth_token(&old.token).await.is_err());
    assert!(adapter.refresh_token(&old.refresh_token).await.is_err());
    // the fresh one works
    assert!(adapter.get_auth_token(&fresh.token).await.is_ok());
}

#[tokio::test]
async fn revoke_reports_whether_a_token_was_live() {
    let adapter = MockAuthAdapter::new();
    let mut u = user("john@doe.com");
    adapter.register(&mut u, None).await.unwrap();
    let session = adapter.signup("john@doe.com", "any").await.unwrap();

    assert!(adapter.revoke_auth_token(&session.token).await.unwrap());
    assert!(!adapter.revoke_auth_token(&session.token).await.unwrap());
    assert!(adapter.get_auth_token(&session.token).await.is_err());
}

#[tokio::test]
async fn signout_invalidates_all_sessions() {
    let adapter = MockAuthAdapter::new();
    let mut u = user("john@doe.com");
    adapter.register(&mut u, None).await.unwrap();
    let first = adapter.signup("john@doe.com", "any").await.unwrap();
    let second = adapter.signup("john@doe.com", "any").await.unwrap();

    adapter.signout(&u).await.unwrap();
    assert!(adapter.get_auth_token(&first.token).await.is_err());
    assert!(adapter.get_auth_token(&second.token).await.is_err());
}

// ── Profile maintenance ──────────────────────────────────────────

#[tokio::test]
async fn update_merges_profile_fields() {
    let adapter = MockAuthAdapter::new();
    let mut u = user("john@doe.com");
    adapter.register(&mut u, None).await.unwrap();

    let mut updatable = Map::new();
    updatable.insert("phone".to_string(), json!("555-0100"));
    adapter.update(&u, &updatable).await.unwrap();
}

#[tokio::test]
async fn delete_then_unknown() {
    let adapter = MockAuthAdapter::new();
    let mut u = user("john@doe.com");
    adapter.register(&mut u, None).await.unwrap();

    adapter.delete(&u).await.unwrap();
    assert_eq!(adapter.registered_count(), 0);
    let err = adapter.delete(&u).await.unwrap_err();
    assert!(matches!(err, AuthError::UnknownUser(_)));
}

#[tokio::test]
async fn custom_claims_round_trip() {
    let adapter = MockAuthAdapter::new();
    let mut claims = Map::new();
    claims.insert("role".to_string(), Value::String("admin".to_string()));
    adapter.set_custom_user_claims("users/1", &claims).await.unwrap();
    assert_eq!(adapter.claims_for("users/1"), Some(claims));
}

// ── Registry ─────────────────────────────────────────────────────

#[test]
fn registry_resolves_and_rejects() {
    let mut registry = AuthRegistry::new();
    let adapter: Arc<dyn AuthAdapter> = Arc::new(MockAuthAdapter::new());
    registry.add(adapter.clone(), "mock-auth", true);

    assert!(Arc::ptr_eq(&registry.get("mock-auth").unwrap(), &adapter));
    assert!(Arc::ptr_eq(&registry.get_default().unwrap(), &adapter));

    let err = registry.get("nope").unwrap_err();
    assert_eq!(err.to_string(), "Unknown auth alias: 'nope'");
}

#[test]
fn global_registry_round_trip() {
    let adapter: Arc<dyn AuthAdapter> = Arc::new(MockAuthAdapter::new());
    add_auth(adapter.clone(), "auth-global-test", false);
    assert!(Arc::ptr_eq(&get_auth("auth-global-test").unwrap(), &adapter));
    assert!(get_auth("auth-missing").is_err());
}
