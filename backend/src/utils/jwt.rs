//! Bearer token issuance and verification.
//!
//! Tokens are signed with the secret from the application configuration and
//! carry the account identifier plus an expiration. Keys are derived once at
//! startup; verification is purely cryptographic and never touches storage.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

/// Claims carried by an issued token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Account document identifier
    pub sub: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// Why a presented token was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not verify")]
    SignatureInvalid,
    #[error("token has expired")]
    Expired,
    #[error("token could not be signed")]
    Creation,
}

/// Issues and verifies signed bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl TokenService {
    /// Derives the signing keys from the configured secret.
    pub fn new(config: &Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        // A token is expired the moment its exp passes, with no grace window.
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            ttl_seconds: config.jwt_expires_in_seconds,
        }
    }

    /// Signs a token for `subject`, expiring after the configured lifetime.
    ///
    /// # Arguments
    /// * `subject` - The account identifier the token authenticates
    ///
    /// # Returns
    /// * `Result<String, TokenError>` - The encoded token or a signing error
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.ttl_seconds as i64);

        let claims = Claims {
            sub: subject.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| TokenError::Creation)
    }

    /// Decodes and checks a presented token.
    ///
    /// # Returns
    /// * `Result<Claims, TokenError>` - The claims, or why the token was
    ///   refused: unparseable, bad signature, or past expiration
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                _ => TokenError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    #[test]
    fn issued_tokens_verify_and_carry_the_subject() {
        let tokens = TokenService::new(&test_config());
        let token = tokens.issue("compte-123").unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "compte-123");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn garbage_is_malformed() {
        let tokens = TokenService::new(&test_config());
        assert_eq!(tokens.verify("pas-un-jeton"), Err(TokenError::Malformed));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let tokens = TokenService::new(&test_config());
        let token = tokens.issue("compte-123").unwrap();

        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert_eq!(tokens.verify(&tampered), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn tokens_signed_with_another_key_are_rejected() {
        let tokens = TokenService::new(&test_config());
        let mut other_config = test_config();
        other_config.jwt_secret = "autre-secret".to_string();
        let other = TokenService::new(&other_config);

        let foreign = other.issue("compte-123").unwrap();
        assert_eq!(tokens.verify(&foreign), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let config = test_config();
        let tokens = TokenService::new(&config);

        let now = Utc::now().timestamp() as usize;
        let stale = Claims {
            sub: "compte-123".to_string(),
            exp: now - 60,
            iat: now - 120,
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(tokens.verify(&token), Err(TokenError::Expired));
    }
}
