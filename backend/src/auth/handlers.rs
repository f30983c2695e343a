//! Handler functions for account-related API endpoints.
//!
//! These functions accept the raw JSON body and hand it to the
//! `auth::service`, which validates it before doing anything else. Handlers
//! only translate service results into HTTP responses.

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};
use serde_json::Value;

use crate::api::common::{ErrorResponse, service_error_to_http};
use crate::auth::models::TokenResponse;
use crate::auth::service::AuthService;
use crate::database::models::UtilisateurPublic;
use crate::state::AppState;

/// Handle account creation
#[axum::debug_handler]
pub async fn inscription(
    Extension(state): Extension<AppState>,
    Json(payload): Json<Value>,
) -> Result<ResponseJson<TokenResponse>, (StatusCode, ResponseJson<ErrorResponse>)> {
    match AuthService::new(&state).register(&payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle account login
#[axum::debug_handler]
pub async fn connexion(
    Extension(state): Extension<AppState>,
    Json(payload): Json<Value>,
) -> Result<ResponseJson<TokenResponse>, (StatusCode, ResponseJson<ErrorResponse>)> {
    match AuthService::new(&state).login(&payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle account listing, hashes redacted
#[axum::debug_handler]
pub async fn liste_utilisateurs(
    Extension(state): Extension<AppState>,
) -> Result<ResponseJson<Vec<UtilisateurPublic>>, (StatusCode, ResponseJson<ErrorResponse>)> {
    match AuthService::new(&state).list_users().await {
        Ok(utilisateurs) => Ok(ResponseJson(utilisateurs)),
        Err(error) => Err(service_error_to_http(error)),
    }
}
