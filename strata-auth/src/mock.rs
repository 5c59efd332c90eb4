//! In-memory identity provider.

use crate::adapter::{AuthAdapter, AuthSession};
use crate::error::{AuthError, AuthResult};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use strata_model::DataObject;
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
struct TokenEntry {
    login: String,
}

/// In-memory auth adapter for tests.
///
/// Keeps registered users, issued token pairs, and custom claims in plain
/// maps. When a clear password was supplied at registration it is checked on
/// sign-up; otherwise any password is accepted, as with providers that own
/// credential verification themselves.
#[derive(Default)]
pub struct MockAuthAdapter {
    users: RwLock<HashMap<String, Map<String, Value>>>,
    passwords: RwLock<HashMap<String, String>>,
    tokens: RwLock<HashMap<String, TokenEntry>>,
    refresh_tokens: RwLock<HashMap<String, String>>,
    claims: RwLock<HashMap<String, Map<String, Value>>>,
}

impl MockAuthAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registered_count(&self) -> usize {
        self.users.read().len()
    }

    pub fn claims_for(&self, id: &str) -> Option<Map<String, Value>> {
        self.claims.read().get(id).cloned()
    }

    fn login_of(user: &DataObject) -> AuthResult<String> {
        user.val("email")
            .and_then(|v| v.as_str().map(String::from))
            .ok_or_else(|| AuthError::Provider("user record has no email".to_string()))
    }

    fn issue(&self, login: &str) -> AuthSession {
        let session = AuthSession {
            token: Uuid::new_v4().to_string(),
            refresh_token: Uuid::new_v4().to_string(),
        };
        self.tokens.write().insert(
            session.token.clone(),
            TokenEntry {
                login: login.to_string(),
            },
        );
        self.refresh_tokens
            .write()
            .insert(session.refresh_token.clone(), session.token.clone());
        session
    }
}

#[async_trait]
impl AuthAdapter for MockAuthAdapter {
    async fn register(
        &self,
        user: &mut DataObject,
        clear_password: Option<&str>,
    ) -> AuthResult<()> {
        let login = Self::login_of(user)?;
        let mut users = self.users.write();
        if users.contains_key(&login) {
            return Err(AuthError::AlreadyRegistered(login));
        }
        let record = match user.to_json(true) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        debug!(%login, "registering user");
        users.insert(login.clone(), record);
        if let Some(clear) = clear_password {
            self.passwords.write().insert(login, clear.to_string());
        }
        Ok(())
    }

    async fn signup(&self, login: &str, password: &str) -> AuthResult<AuthSession> {
        if !self.users.read().contains_key(login) {
            return Err(AuthError::UnknownUser(login.to_string()));
        }
        if let Some(expected) = self.passwords.read().get(login) {
            if expected != password {
                return Err(AuthError::InvalidCredentials(login.to_string()));
            }
        }
        Ok(self.issue(login))
    }

    async fn signout(&self, user: &DataObject) -> AuthResult<()> {
        let login = Self::login_of(user)?;
        let mut tokens = self.tokens.write();
        let revoked: Vec<String> = tokens
            .iter()
            .filter(|(_, entry)| entry.login == login)
            .map(|(token, _)| token.clone())
            .collect();
        for token in &revoked {
            tokens.remove(token);
        }
        self.refresh_tokens
            .write()
            .retain(|_, token| !revoked.contains(token));
        Ok(())
    }

    async fn update(&self, user: &DataObject, updatable: &Map<String, Value>) -> AuthResult<()> {
        let login = Self::login_of(user)?;
        let mut users = self.users.write();
        let record = users
            .get_mut(&login)
            .ok_or_else(|| AuthError::UnknownUser(login.clone()))?;
        for (key, value) in updatable {
            record.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete(&self, user: &DataObject) -> AuthResult<()> {
        let login = Self::login_of(user)?;
        if self.users.write().remove(&login).is_none() {
            return Err(AuthError::UnknownUser(login));
        }
        self.passwords.write().remove(&login);
        self.signout(user).await
    }

    async fn get_auth_token(&self, bearer: &str) -> AuthResult<Value> {
        let tokens = self.tokens.read();
        let entry = tokens.get(bearer).ok_or(AuthError::InvalidToken)?;
        Ok(json!({
            "login": entry.login,
            "token": bearer,
        }))
    }

    async fn refresh_token(&self, refresh_token: &str) -> AuthResult<AuthSession> {
        let old_token = self
            .refresh_tokens
            .write()
            .remove(refresh_token)
            .ok_or(AuthError::InvalidToken)?;
        let entry = self
            .tokens
            .write()
            .remove(&old_token)
            .ok_or(AuthError::InvalidToken)?;
        Ok(self.issue(&entry.login))
    }

    async fn revoke_auth_token(&self, token: &str) -> AuthResult<bool> {
        let removed = self.tokens.write().remove(token).is_some();
        if removed {
            self.refresh_tokens.write().retain(|_, t| t != token);
        }
        Ok(removed)
    }

    async fn set_custom_user_claims(
        &self,
        id: &str,
        claims: &Map<String, Value>,
    ) -> AuthResult<()> {
        self.claims.write().insert(id.to_string(), claims.clone());
        Ok(())
    }
}
