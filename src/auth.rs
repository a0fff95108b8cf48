//! Session lookup
//!
//! Authentication itself lives outside this crate. What the server needs is
//! a way to turn the session token carried by a request into a
//! `SessionUser`; `SessionResolver` is that seam.

use crate::error::MeetError;
use crate::types::SessionUser;
use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cookie carrying the session token
pub const SESSION_COOKIE: &str = "meet_ai.session_token";

/// Resolves a session token to the user it belongs to
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// `None` when the token is unknown or expired
    async fn resolve(&self, token: &str) -> Option<SessionUser>;
}

/// Shared resolver handle stored in application state
pub type SharedResolver = Arc<dyn SessionResolver>;

/// Token → user table held in memory, seeded from configuration
#[derive(Default)]
pub struct MemorySessionResolver {
    sessions: RwLock<HashMap<String, SessionUser>>,
}

impl MemorySessionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(sessions: impl IntoIterator<Item = (String, SessionUser)>) -> Self {
        Self {
            sessions: RwLock::new(sessions.into_iter().collect()),
        }
    }

    pub async fn insert(&self, token: impl Into<String>, user: SessionUser) {
        self.sessions.write().await.insert(token.into(), user);
    }

    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}

#[async_trait]
impl SessionResolver for MemorySessionResolver {
    async fn resolve(&self, token: &str) -> Option<SessionUser> {
        self.sessions.read().await.get(token).cloned()
    }
}

/// Pull the session token from the cookie header, falling back to a bearer token
pub fn session_token(parts: &Parts) -> Option<String> {
    let from_cookie = parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string());

    from_cookie.or_else(|| {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
    })
    .filter(|t| !t.is_empty())
}

/// Extractor for handlers that require a signed-in user
#[derive(Debug, Clone)]
pub struct AuthSession(pub SessionUser);

#[async_trait]
impl<S> FromRequestParts<S> for AuthSession
where
    SharedResolver: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = MeetError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = session_token(parts)
            .ok_or_else(|| MeetError::Unauthorized("missing session".to_string()))?;

        let resolver = SharedResolver::from_ref(state);
        let user = resolver
            .resolve(&token)
            .await
            .ok_or_else(|| MeetError::Unauthorized("invalid session".to_string()))?;

        tracing::debug!(user_id = %user.id, "Session resolved");
        Ok(AuthSession(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: (&str, &str)) -> Parts {
        let (parts, _) = Request::builder()
            .header(header.0, header.1)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_token_from_cookie() {
        let parts = parts_with(("cookie", "theme=dark; meet_ai.session_token=tok-1; x=y"));
        assert_eq!(session_token(&parts).as_deref(), Some("tok-1"));
    }

    #[test]
    fn test_token_from_bearer() {
        let parts = parts_with(("authorization", "Bearer tok-2"));
        assert_eq!(session_token(&parts).as_deref(), Some("tok-2"));
    }

    #[test]
    fn test_missing_token() {
        let parts = parts_with(("cookie", "theme=dark"));
        assert!(session_token(&parts).is_none());

        let parts = parts_with(("authorization", "Bearer "));
        assert!(session_token(&parts).is_none());
    }

    #[tokio::test]
    async fn test_memory_resolver() {
        let resolver = MemorySessionResolver::new();
        resolver
            .insert("tok", SessionUser::new("u1", "Alice", "alice@example.com"))
            .await;

        assert_eq!(resolver.resolve("tok").await.unwrap().id, "u1");
        assert!(resolver.resolve("other").await.is_none());

        assert!(resolver.revoke("tok").await);
        assert!(resolver.resolve("tok").await.is_none());
    }
}
