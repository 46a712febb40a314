//! Validate config before any component is built from it.

use crate::config::loader::looks_like_bcrypt;
use crate::config::types::JournalConfig;
use crate::error::ConfigError;

/// Reject settings that would make the service unusable or unsafe to start.
pub fn validate(config: &JournalConfig) -> Result<(), ConfigError> {
    let auth = &config.auth;
    if auth.username.trim().is_empty() {
        return Err(ConfigError::Validation("AUTH_USERNAME must not be empty".into()));
    }
    if !looks_like_bcrypt(&auth.password_hash) {
        return Err(ConfigError::Validation(
            "AUTH_PASSWORD must be a bcrypt hash".into(),
        ));
    }
    if auth.auth_secret.is_empty() {
        return Err(ConfigError::Validation(
            "JOURNAL_AUTH_SECRET must not be empty".into(),
        ));
    }
    if auth.session_secret.is_empty() {
        return Err(ConfigError::Validation(
            "JOURNAL_SESSION_SECRET must not be empty".into(),
        ));
    }
    if config.database.max_connections == 0 {
        return Err(ConfigError::Validation(
            "JOURNAL_DB_MAX_CONNECTIONS must be at least 1".into(),
        ));
    }
    if config.database.acquire_timeout.is_zero() {
        return Err(ConfigError::Validation(
            "JOURNAL_DB_ACQUIRE_TIMEOUT_SECS must be at least 1".into(),
        ));
    }
    // Postgres reads statement_timeout=0 as "no limit".
    if config.database.statement_timeout.is_zero() {
        return Err(ConfigError::Validation(
            "JOURNAL_STATEMENT_TIMEOUT_MS must be at least 1".into(),
        ));
    }
    if config.database.url.trim().is_empty() {
        return Err(ConfigError::Validation("DATABASE_URL must not be empty".into()));
    }
    Ok(())
}
