//! Data models for account requests and responses.

use serde::{Deserialize, Serialize};

/// Account creation payload, shaped from a validated request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InscriptionRequest {
    pub courriel: String,
    pub mdp: String,
}

/// Login payload, shaped from a validated request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnexionRequest {
    pub courriel: String,
    pub mdp: String,
}

/// Body returned on successful registration or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
