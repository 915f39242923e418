//! Session authentication against the external auth service's `session` table.
//!
//! The token comes from `Authorization: Bearer <token>` or, failing that, the
//! session cookie. Signed cookie values (`token.signature`) contribute only
//! the token part.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use sqlx::PgPool;
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;

/// Resolves a session token to the id of the user it belongs to.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// `Ok(None)` for unknown or expired sessions.
    async fn resolve(&self, token: &str) -> Result<Option<String>, AppError>;
}

pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn resolve(&self, token: &str) -> Result<Option<String>, AppError> {
        Ok(sqlx::query_scalar::<_, String>(
            r#"SELECT user_id FROM "session" WHERE token = $1 AND expires_at > NOW()"#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?)
    }
}

/// The authenticated caller. Extract it before anything else in a handler so
/// an unauthenticated request is rejected before any data access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = session_token(&parts.headers, &state.config.session_cookie_name)
            .ok_or(AppError::Unauthorized)?;

        match state.sessions.resolve(&token).await? {
            Some(user_id) => Ok(AuthUser { user_id }),
            None => {
                debug!("Rejected unknown or expired session token");
                Err(AppError::Unauthorized)
            }
        }
    }
}

/// Finds the session token in the request headers.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        return Some(token.to_string());
    }

    let secure_name = format!("__Secure-{cookie_name}");
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name || *name == secure_name)
        .map(|(_, value)| value.split('.').next().unwrap_or(value).trim().to_string())
        .filter(|t| !t.is_empty())
}
