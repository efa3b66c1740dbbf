//! Persisted auth session: the client side of login, logout and the
//! bearer token attached to authenticated requests.
//!
//! Whenever the stored token turns out corrupted or expired, the whole
//! session (token, refresh token, cached user) is purged before reporting
//! "not authenticated", so the next read starts from a clean slate instead
//! of hitting the same decode failure again.

use crate::error::{Result, SessionError};
use crate::guard::{inspect_with_leeway, now_millis, TokenStatus};
use crate::storage::{clear_stored_session, SessionStore};
use carrepair_core::GuardConfig;
use serde::{Deserialize, Serialize};

/// Cached profile of the logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    /// CPF or CNPJ given at registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// What the server hands back on login/registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSession {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

pub struct AuthSession<S: SessionStore> {
    store: S,
    config: GuardConfig,
}

impl<S: SessionStore> AuthSession<S> {
    pub fn new(store: S, config: GuardConfig) -> Self {
        Self { store, config }
    }

    pub fn with_defaults(store: S) -> Self {
        Self::new(store, GuardConfig::default())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Inspect the stored token, purging the session if it is unusable
    pub async fn status(&self) -> TokenStatus {
        self.check().await.0
    }

    pub async fn is_logged_in(&self) -> bool {
        self.status().await.is_valid()
    }

    /// The stored token, only while it is valid
    pub async fn bearer_token(&self) -> Option<String> {
        match self.check().await {
            (TokenStatus::Valid, token) => token,
            _ => None,
        }
    }

    /// `Authorization` header value for outgoing requests
    pub async fn authorization_header(&self) -> Option<String> {
        self.bearer_token()
            .await
            .map(|token| format!("Bearer {}", token))
    }

    /// Persist a session received at login or registration.
    ///
    /// The token is checked first; a token that would be purged on the next
    /// read is refused instead of stored. If any write fails the stored
    /// session is cleared before the error is returned.
    pub async fn save_session(&self, session: &NewSession) -> Result<()> {
        let status = inspect_with_leeway(
            Some(session.token.as_str()),
            now_millis(),
            self.config.leeway_seconds,
        );
        if !status.is_valid() {
            return Err(SessionError::TokenRejected(status.to_string()));
        }

        if let Err(e) = self.write_session(session).await {
            tracing::warn!(error = %e, "session save failed, clearing partial session");
            clear_stored_session(&self.store, &self.config.keys).await;
            return Err(e);
        }

        tracing::info!("session saved");
        Ok(())
    }

    /// Companions first, token last: a token is never stored next to
    /// another login's refresh token or profile
    async fn write_session(&self, session: &NewSession) -> Result<()> {
        let keys = &self.config.keys;

        match &session.refresh_token {
            Some(refresh) => self.store.set(&keys.refresh_token, refresh).await?,
            None => self.store.remove(&keys.refresh_token).await?,
        }

        match &session.user {
            Some(user) => {
                let json = serde_json::to_string(user)?;
                self.store.set(&keys.user, &json).await?;
            }
            None => self.store.remove(&keys.user).await?,
        }

        self.store.set(&keys.token, &session.token).await
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.read(&self.config.keys.refresh_token).await
    }

    /// The cached user, `None` if absent or unreadable
    pub async fn cached_user(&self) -> Option<UserProfile> {
        let json = self.read(&self.config.keys.user).await?;
        match serde_json::from_str(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "cached user profile is unreadable");
                None
            }
        }
    }

    pub async fn logout(&self) {
        clear_stored_session(&self.store, &self.config.keys).await;
        tracing::info!("logged out");
    }

    async fn check(&self) -> (TokenStatus, Option<String>) {
        let token = self.read(&self.config.keys.token).await;
        let status = inspect_with_leeway(token.as_deref(), now_millis(), self.config.leeway_seconds);

        if status.requires_purge() {
            tracing::warn!(status = %status, "stored token unusable, clearing session");
            clear_stored_session(&self.store, &self.config.keys).await;
            return (status, None);
        }

        (status, token)
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "session storage read failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    // header.{"exp":4102444800,"sub":"42"}.sig
    const VALID_TOKEN: &str =
        "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJleHAiOjQxMDI0NDQ4MDAsInN1YiI6IjQyIn0.sig";
    // header.{"exp":1000000000}.sig
    const EXPIRED_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJleHAiOjEwMDAwMDAwMDB9.sig";

    fn user() -> UserProfile {
        UserProfile {
            id: "42".to_string(),
            name: "Maria Souza".to_string(),
            email: "maria@example.com".to_string(),
            document: Some("529.982.247-25".to_string()),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_not_logged_in_without_token() {
        let session = AuthSession::with_defaults(MemoryStore::new());
        assert_eq!(session.status().await, TokenStatus::NotLoggedIn);
        assert!(!session.is_logged_in().await);
        assert_eq!(session.authorization_header().await, None);
    }

    #[tokio::test]
    async fn test_save_and_use_session() {
        let session = AuthSession::with_defaults(MemoryStore::new());
        session
            .save_session(&NewSession {
                token: VALID_TOKEN.to_string(),
                refresh_token: Some("refresh-1".to_string()),
                user: Some(user()),
            })
            .await
            .unwrap();

        assert!(session.is_logged_in().await);
        assert_eq!(
            session.authorization_header().await,
            Some(format!("Bearer {}", VALID_TOKEN))
        );
        assert_eq!(session.refresh_token().await.as_deref(), Some("refresh-1"));
        assert_eq!(session.cached_user().await, Some(user()));
    }

    #[tokio::test]
    async fn test_save_refuses_unusable_token() {
        let session = AuthSession::with_defaults(MemoryStore::new());
        let err = session
            .save_session(&NewSession {
                token: EXPIRED_TOKEN.to_string(),
                refresh_token: None,
                user: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::TokenRejected(_)));
        assert!(session.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_token_purges_session() {
        let keys = GuardConfig::default().keys;
        let store = MemoryStore::new();
        store.set(&keys.token, EXPIRED_TOKEN).await.unwrap();
        store.set(&keys.refresh_token, "refresh").await.unwrap();
        store.set(&keys.user, "{}").await.unwrap();

        let session = AuthSession::with_defaults(store);
        assert_eq!(session.status().await, TokenStatus::Expired);
        assert!(session.store().is_empty().await);
        assert_eq!(session.status().await, TokenStatus::NotLoggedIn);
    }

    #[tokio::test]
    async fn test_unreadable_user_profile() {
        let keys = GuardConfig::default().keys;
        let store = MemoryStore::new();
        store.set(&keys.user, "{broken").await.unwrap();

        let session = AuthSession::with_defaults(store);
        assert_eq!(session.cached_user().await, None);
    }

    #[tokio::test]
    async fn test_logout() {
        let session = AuthSession::with_defaults(MemoryStore::new());
        session
            .save_session(&NewSession {
                token: VALID_TOKEN.to_string(),
                refresh_token: None,
                user: Some(user()),
            })
            .await
            .unwrap();

        session.logout().await;
        assert!(!session.is_logged_in().await);
        assert!(session.store().is_empty().await);
    }
}
