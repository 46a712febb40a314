//! Learning journal: session-authenticated entry publishing on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod render;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::JournalConfig;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::{app, common_routes, journal_routes};
pub use service::{CredentialVerifier, Entry, EntryDraft, EntryStore, SessionManager, TransactionScope};
pub use state::AppState;
pub use store::{connect_pool, connect_pool_lazy, ensure_database_exists};
