//! Shared application state for all routes. Built once from config; cheap to clone.

use crate::config::JournalConfig;
use crate::error::AppError;
use crate::service::{CredentialVerifier, SessionManager, TransactionScope};
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<JournalConfig>,
    pub transactions: TransactionScope,
    pub credentials: Arc<CredentialVerifier>,
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new(pool: PgPool, config: JournalConfig) -> Result<Self, AppError> {
        let sessions = SessionManager::new(&config.auth)?;
        Ok(Self {
            transactions: TransactionScope::new(pool),
            credentials: Arc::new(CredentialVerifier::new(&config.auth)),
            sessions: Arc::new(sessions),
            config: Arc::new(config),
        })
    }

    pub fn pool(&self) -> &PgPool {
        self.transactions.pool()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.cookie_key().clone()
    }
}
