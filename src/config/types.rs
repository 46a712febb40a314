//! Runtime configuration types. Built once at startup and shared read-only.

use std::time::Duration;

/// Full service configuration, sourced from the environment.
#[derive(Clone, Debug)]
pub struct JournalConfig {
    /// Original `DEBUG` switch; raises the default log level.
    pub debug: bool,
    pub port: u16,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
}

#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    /// How long a request waits for a pooled connection.
    pub acquire_timeout: Duration,
    /// Server-side `statement_timeout` applied to every connection.
    pub statement_timeout: Duration,
}

#[derive(Clone)]
pub struct AuthSettings {
    pub username: String,
    /// bcrypt hash of the admin password.
    pub password_hash: String,
    /// Keys the HMAC over the identity ticket.
    pub auth_secret: String,
    /// Derives the cookie jar signing key.
    pub session_secret: String,
    /// Ticket lifetime. `None` keeps the ticket valid until logout.
    pub ticket_timeout: Option<Duration>,
    pub secure_cookie: bool,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("auth_secret", &"<redacted>")
            .field("session_secret", &"<redacted>")
            .field("ticket_timeout", &self.ticket_timeout)
            .field("secure_cookie", &self.secure_cookie)
            .finish()
    }
}
