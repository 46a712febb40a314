//! Load config from environment variables (or any key lookup, for tests).

use crate::config::types::{AuthSettings, DatabaseSettings, JournalConfig};
use crate::config::validate;
use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/learning-journal";
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "secret";
pub const DEFAULT_SESSION_SECRET: &str = "itsaseekrit";
pub const DEFAULT_AUTH_SECRET: &str = "anotherseekrit";
pub const DEFAULT_PORT: u16 = 5000;

impl JournalConfig {
    /// Read every setting from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|key| std::env::var(key).ok())
    }

    /// Build and validate config from a key lookup. Unset keys fall back to defaults.
    pub fn load<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = DatabaseSettings {
            url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            max_connections: parse_or(&get, "JOURNAL_DB_MAX_CONNECTIONS", 5)?,
            acquire_timeout: Duration::from_secs(parse_or(
                &get,
                "JOURNAL_DB_ACQUIRE_TIMEOUT_SECS",
                5,
            )?),
            statement_timeout: Duration::from_millis(parse_or(
                &get,
                "JOURNAL_STATEMENT_TIMEOUT_MS",
                5000,
            )?),
        };

        let password_hash = match get("AUTH_PASSWORD") {
            Some(value) if looks_like_bcrypt(&value) => value,
            Some(plain) => {
                tracing::warn!("AUTH_PASSWORD is not a bcrypt hash; hashing it at startup");
                hash_password(&plain, parse_or(&get, "JOURNAL_BCRYPT_COST", bcrypt::DEFAULT_COST)?)?
            }
            None => hash_password(
                DEFAULT_PASSWORD,
                parse_or(&get, "JOURNAL_BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            )?,
        };

        let ticket_timeout = get("JOURNAL_AUTH_TIMEOUT_SECS")
            .map(|v| parse_value::<u64>("JOURNAL_AUTH_TIMEOUT_SECS", &v))
            .transpose()?
            .map(Duration::from_secs);

        let auth = AuthSettings {
            username: lookup("AUTH_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.into()),
            password_hash,
            auth_secret: lookup("JOURNAL_AUTH_SECRET").unwrap_or_else(|| DEFAULT_AUTH_SECRET.into()),
            session_secret: lookup("JOURNAL_SESSION_SECRET")
                .unwrap_or_else(|| DEFAULT_SESSION_SECRET.into()),
            ticket_timeout,
            secure_cookie: get("JOURNAL_SECURE_COOKIE")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        };

        let config = JournalConfig {
            debug: get("DEBUG").map(|v| parse_flag(&v)).unwrap_or(true),
            port: parse_or(&get, "PORT", DEFAULT_PORT)?,
            database,
            auth,
        };
        validate(&config)?;
        Ok(config)
    }
}

/// `$2a$`, `$2b$`, `$2x$` or `$2y$` prefix and the fixed 60-char encoding.
pub fn looks_like_bcrypt(value: &str) -> bool {
    let prefixed = ["$2a$", "$2b$", "$2x$", "$2y$"]
        .iter()
        .any(|p| value.starts_with(p));
    prefixed && value.len() == 60
}

fn hash_password(plain: &str, cost: u32) -> Result<String, ConfigError> {
    bcrypt::hash(plain, cost).map_err(|e| ConfigError::Load(format!("AUTH_PASSWORD: {}", e)))
}

fn parse_or<G, T>(get: &G, key: &str, default: T) -> Result<T, ConfigError>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match get(key) {
        Some(v) => parse_value(key, &v),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Load(format!("{}: cannot parse '{}'", key, value)))
}

/// DEBUG as read by [`JournalConfig::load`], for setting up logging before the full load.
pub fn debug_from_env() -> bool {
    std::env::var("DEBUG").map(|v| parse_flag(&v)).unwrap_or(true)
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_from(pairs: &[(&str, &str)]) -> Result<JournalConfig, ConfigError> {
        let mut vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        vars.entry("JOURNAL_BCRYPT_COST".into()).or_insert_with(|| "4".into());
        JournalConfig::load(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_follow_original_settings() {
        let cfg = load_from(&[]).unwrap();
        assert!(cfg.debug);
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.auth.username, "admin");
        assert_eq!(cfg.auth.session_secret, "itsaseekrit");
        assert_eq!(cfg.auth.auth_secret, "anotherseekrit");
        assert!(cfg.auth.ticket_timeout.is_none());
        assert!(bcrypt::verify("secret", &cfg.auth.password_hash).unwrap());
    }

    #[test]
    fn bcrypt_hash_is_kept_verbatim() {
        let hash = bcrypt::hash("hunter2", 4).unwrap();
        let cfg = load_from(&[("AUTH_PASSWORD", &hash)]).unwrap();
        assert_eq!(cfg.auth.password_hash, hash);
    }

    #[test]
    fn plaintext_password_is_hashed() {
        let cfg = load_from(&[("AUTH_PASSWORD", "hunter2")]).unwrap();
        assert!(looks_like_bcrypt(&cfg.auth.password_hash));
        assert!(bcrypt::verify("hunter2", &cfg.auth.password_hash).unwrap());
    }

    #[test]
    fn numeric_settings_are_parsed() {
        let cfg = load_from(&[
            ("PORT", "8080"),
            ("DEBUG", "false"),
            ("JOURNAL_DB_MAX_CONNECTIONS", "12"),
            ("JOURNAL_STATEMENT_TIMEOUT_MS", "250"),
            ("JOURNAL_AUTH_TIMEOUT_SECS", "3600"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert!(!cfg.debug);
        assert_eq!(cfg.database.max_connections, 12);
        assert_eq!(cfg.database.statement_timeout, Duration::from_millis(250));
        assert_eq!(cfg.auth.ticket_timeout, Some(Duration::from_secs(3600)));
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = load_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::Load(msg) if msg.contains("PORT")));
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        let err = load_from(&[("JOURNAL_STATEMENT_TIMEOUT_MS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(msg) if msg.contains("STATEMENT_TIMEOUT")));

        let err = load_from(&[("JOURNAL_DB_ACQUIRE_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(msg) if msg.contains("ACQUIRE_TIMEOUT")));
    }

    #[test]
    fn empty_secret_is_rejected() {
        let err = load_from(&[("JOURNAL_AUTH_SECRET", "")]).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
