//! Journal services: entry store, input validation, credentials, sessions, transaction scope.

mod credentials;
mod entries;
mod session;
mod transaction;
mod validation;
pub use credentials::CredentialVerifier;
pub use entries::{Entry, EntryStore};
pub use session::{SessionManager, AUTH_COOKIE};
pub use transaction::{Outcome, TransactionScope};
pub use validation::{EntryDraft, TITLE_MAX_CHARS};
