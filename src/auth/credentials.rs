//! Credential verification, decoupled from how passwords are stored

use crate::error::{HelpdeskError, Result};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Checks a username/password pair
#[cfg_attr(test, mockall::automock)]
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Single configured identity with an argon2 PHC password hash
#[derive(Debug, Clone)]
pub struct Argon2Verifier {
    username: String,
    password_hash: Option<String>,
}

/// Hash used when no identity is configured, so a failed lookup costs the
/// same as a failed password check
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$9sTbSlTio3Biev89thdrlKKiCaYsjjYVJxGAL3swxpQ";

impl Argon2Verifier {
    /// Build a verifier, rejecting malformed hashes up front
    pub fn new(username: impl Into<String>, password_hash: Option<String>) -> Result<Self> {
        if let Some(hash) = &password_hash {
            PasswordHash::new(hash)
                .map_err(|e| HelpdeskError::PasswordHash(format!("invalid password hash: {e}")))?;
        }
        Ok(Self {
            username: username.into(),
            password_hash,
        })
    }

    /// Whether a password hash is configured at all
    pub const fn is_configured(&self) -> bool {
        self.password_hash.is_some()
    }
}

impl CredentialVerifier for Argon2Verifier {
    fn verify(&self, username: &str, password: &str) -> bool {
        let hash = self.password_hash.as_deref().unwrap_or(DUMMY_HASH);
        // Always run the hash check so unknown users are not faster to reject
        let password_ok = PasswordHash::new(hash).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        });
        password_ok && self.password_hash.is_some() && username == self.username
    }
}

/// Produce an argon2id PHC string for a password
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| HelpdeskError::PasswordHash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("admin123").unwrap();
        assert!(hash.starts_with("$argon2id$"));

        let verifier = Argon2Verifier::new("admin", Some(hash)).unwrap();
        assert!(verifier.is_configured());
        assert!(verifier.verify("admin", "admin123"));
        assert!(!verifier.verify("admin", "wrong"));
        assert!(!verifier.verify("someone", "admin123"));
    }

    #[test]
    fn test_unconfigured_verifier_rejects_everything() {
        let verifier = Argon2Verifier::new("admin", None).unwrap();
        assert!(!verifier.is_configured());
        assert!(!verifier.verify("admin", ""));
        assert!(!verifier.verify("admin", "admin123"));
    }

    #[test]
    fn test_malformed_hash_rejected() {
        assert!(Argon2Verifier::new("admin", Some("plaintext".into())).is_err());
    }
}
