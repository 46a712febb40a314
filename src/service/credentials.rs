//! Admin credential check: exact username match plus a bcrypt comparison of the password.

use crate::config::AuthSettings;
use crate::error::AppError;
use subtle::ConstantTimeEq;

pub struct CredentialVerifier {
    username: String,
    password_hash: String,
}

impl CredentialVerifier {
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            username: settings.username.clone(),
            password_hash: settings.password_hash.clone(),
        }
    }

    /// `Ok(false)` is a failed login, not an error. Empty fields are a `Validation` error.
    ///
    /// Runs bcrypt even when the username is wrong so both failures cost the same.
    /// This blocks for the bcrypt cost; call it from `spawn_blocking` in async code.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool, AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "both username and password are required".into(),
            ));
        }
        let username_ok = self.is_admin(username);
        let password_ok = bcrypt::verify(password, &self.password_hash).map_err(|e| {
            AppError::Internal(format!("configured password hash is unusable: {}", e))
        })?;
        Ok(username_ok && password_ok)
    }

    /// Whether `identity` names the configured admin.
    pub fn is_admin(&self, identity: &str) -> bool {
        bool::from(identity.as_bytes().ct_eq(self.username.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> CredentialVerifier {
        CredentialVerifier {
            username: "admin".into(),
            password_hash: bcrypt::hash("secret", 4).unwrap(),
        }
    }

    #[test]
    fn exact_credentials_verify() {
        assert!(verifier().verify("admin", "secret").unwrap());
    }

    #[test]
    fn wrong_password_is_a_plain_failure() {
        assert!(!verifier().verify("admin", "Secret").unwrap());
    }

    #[test]
    fn wrong_username_is_a_plain_failure() {
        let v = verifier();
        assert!(!v.verify("Admin", "secret").unwrap());
        assert!(!v.verify("admin ", "secret").unwrap());
        assert!(!v.verify("administrator", "secret").unwrap());
    }

    #[test]
    fn empty_fields_are_validation_errors() {
        let v = verifier();
        assert!(matches!(v.verify("", "secret"), Err(AppError::Validation(_))));
        assert!(matches!(v.verify("admin", ""), Err(AppError::Validation(_))));
        assert!(matches!(v.verify("", ""), Err(AppError::Validation(_))));
    }

    #[test]
    fn admin_identity_must_match_exactly() {
        let v = verifier();
        assert!(v.is_admin("admin"));
        assert!(!v.is_admin("admi"));
        assert!(!v.is_admin(""));
    }

    #[test]
    fn broken_hash_is_internal() {
        let v = CredentialVerifier {
            username: "admin".into(),
            password_hash: "not-a-hash".into(),
        };
        assert!(matches!(v.verify("admin", "secret"), Err(AppError::Internal(_))));
    }
}
