//! Shared response types and error mapping for the HTTP boundary.
//!
//! Every service failure crosses into HTTP exactly once, here. Client-fixable
//! failures keep their French message; anything unexpected is logged and
//! leaves as an opaque 500.

use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::ServiceError;
use crate::validation::FieldError;

/// Error body returned to clients. `erreurs` carries the per-field detail
/// for validation failures and is omitted otherwise.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub erreurs: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            erreurs: None,
        }
    }
}

/// Plain confirmation body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The generic refusal for anything that fails authentication.
fn unauthorized() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::message("Accès non autorisé")),
    )
}

/// Maps a service failure to its HTTP status and client-facing body.
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, Json<ErrorResponse>) {
    match error {
        ServiceError::Validation(errors) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                message: "Données invalides".to_string(),
                erreurs: Some(errors.0),
            }),
        ),
        ServiceError::EmailTaken => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::message("Courriel déjà utilisé")),
        ),
        ServiceError::EmailNotFound => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::message("Le courriel n'existe pas")),
        ),
        ServiceError::BadPassword => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::message("Mot de passe incorrect")),
        ),
        ServiceError::Unauthorized => unauthorized(),
        ServiceError::NotFound { ref entity, .. } => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::message(format!("{entity} non trouvé"))),
        ),
        other => {
            error!("unexpected service failure: {other}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::message("Une erreur s'est produite")),
            )
        }
    }
}
