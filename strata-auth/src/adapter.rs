//! The contract every identity-provider adapter implements.

use crate::error::AuthResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strata_model::DataObject;

/// Token pair issued on successful sign-up or refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub refresh_token: String,
}

/// Abstract identity provider interface.
///
/// Implementations are thin glue over third-party providers; the core only
/// depends on these signatures. User records are plain [`DataObject`]s built
/// from the user schema.
#[async_trait]
pub trait AuthAdapter: Send + Sync {
    /// Registers a user with the provider. `clear_password` carries the
    /// plain text for providers that need it (the record itself only ever
    /// holds the digest).
    async fn register(&self, user: &mut DataObject, clear_password: Option<&str>)
        -> AuthResult<()>;

    /// Authenticates a login and issues a token pair.
    async fn signup(&self, login: &str, password: &str) -> AuthResult<AuthSession>;

    /// Invalidates every token issued to the user.
    async fn signout(&self, user: &DataObject) -> AuthResult<()>;

    /// Pushes updatable profile fields to the provider.
    async fn update(&self, user: &DataObject, updatable: &Map<String, Value>) -> AuthResult<()>;

    /// Removes the user from the provider.
    async fn delete(&self, user: &DataObject) -> AuthResult<()>;

    /// Resolves a bearer token to its claims.
    async fn get_auth_token(&self, bearer: &str) -> AuthResult<Value>;

    /// Exchanges a refresh token for a fresh session, invalidating the old
    /// pair.
    async fn refresh_token(&self, refresh_token: &str) -> AuthResult<AuthSession>;

    /// Revokes a token. Returns whether a live token was actually revoked.
    async fn revoke_auth_token(&self, token: &str) -> AuthResult<bool>;

    /// Attaches custom claims to a user id.
    async fn set_custom_user_claims(&self, id: &str, claims: &Map<String, Value>)
        -> AuthResult<()>;
}
