//! Extract the caller's identity from the signed `auth_tkt` cookie.

use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::SignedCookieJar;

/// Identity asserted by a valid ticket, if any. Never rejects.
#[derive(Clone, Debug)]
pub struct CurrentIdentity(pub Option<String>);

impl CurrentIdentity {
    /// True only when the ticket names the configured admin.
    pub fn is_admin(&self, state: &AppState) -> bool {
        self.0
            .as_deref()
            .map(|identity| state.credentials.is_admin(identity))
            .unwrap_or(false)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentIdentity {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_headers(&parts.headers, state.sessions.cookie_key().clone());
        Ok(CurrentIdentity(state.sessions.current_identity(&jar)))
    }
}

/// Admin identity for protected routes. Rejects with 403 otherwise.
#[derive(Clone, Debug)]
pub struct AdminIdentity(pub String);

#[async_trait]
impl FromRequestParts<AppState> for AdminIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let identity = CurrentIdentity::from_request_parts(parts, state)
            .await
            .unwrap_or(CurrentIdentity(None));
        match identity.0 {
            Some(name) if state.credentials.is_admin(&name) => Ok(AdminIdentity(name)),
            _ => {
                tracing::debug!(path = %parts.uri.path(), "protected route without admin identity");
                Err(AppError::Forbidden)
            }
        }
    }
}
