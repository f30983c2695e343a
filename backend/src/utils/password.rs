//! Password hashing and verification.
//!
//! Wraps bcrypt with the cost factor taken from the application
//! configuration. The salt is generated per hash and embedded in the result,
//! so verification needs no extra state.

use thiserror::Error;

/// Errors from hashing or checking a password.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("hashing failed")]
    Hashing(#[source] bcrypt::BcryptError),
    #[error("stored hash is not a valid bcrypt string")]
    Corrupt(#[source] bcrypt::BcryptError),
}

/// One-way hashing and verification of account passwords.
///
/// Holds a pre-computed fallback hash so the unknown-email login path can
/// burn the same amount of work as a real check, keeping response timing
/// comparable between "no such email" and "wrong password".
#[derive(Clone)]
pub struct CredentialHasher {
    cost: u32,
    fallback_hash: String,
}

impl CredentialHasher {
    /// Creates a hasher with the given bcrypt cost factor.
    pub fn new(cost: u32) -> Result<Self, HashError> {
        let fallback_hash = bcrypt::hash("mot-de-passe-fantome", cost).map_err(HashError::Hashing)?;
        Ok(Self {
            cost,
            fallback_hash,
        })
    }

    /// Hashes a password with the configured cost.
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        bcrypt::hash(password, self.cost).map_err(HashError::Hashing)
    }

    /// Checks a password against a stored hash. A mismatch is `Ok(false)`;
    /// only an unparseable stored hash is an error.
    pub fn verify(&self, password: &str, hashed: &str) -> Result<bool, HashError> {
        bcrypt::verify(password, hashed).map_err(HashError::Corrupt)
    }

    /// Verifies against the fallback hash and discards the result.
    pub fn verify_fallback(&self, password: &str) {
        let _ = bcrypt::verify(password, &self.fallback_hash);
    }
}
