//! Global application error types.
//!
//! This module defines the error taxonomy used across the backend and the
//! `ServiceResult` alias services return. Variants carry enough structure
//! for the API boundary to pick a status code and a client-facing message;
//! anything unexpected is wrapped unmodified and mapped to a 500 exactly
//! once, at that boundary.

use crate::utils::jwt::TokenError;
use crate::utils::password::HashError;
use crate::validation::ValidationErrors;
use thiserror::Error;

/// Service-layer error covering validation, authentication, and storage.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request payload was rejected by the input validator.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Registration attempted with an email that already has a credential.
    #[error("email already registered")]
    EmailTaken,

    /// Login attempted with an email no credential matches.
    #[error("no credential for that email")]
    EmailNotFound,

    /// Login attempted with a password that does not match the stored hash.
    #[error("password mismatch")]
    BadPassword,

    /// The request lacked a valid bearer token.
    #[error("missing or invalid bearer token")]
    Unauthorized,

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("token error: {0}")]
    Token(#[from] TokenError),

    #[error("credential hashing error: {0}")]
    Hash(#[from] HashError),

    /// Anything unexpected: store failures, corrupt stored data.
    #[error("internal error: {source}")]
    Internal {
        #[from]
        source: anyhow::Error,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }
}
