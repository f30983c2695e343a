//! Handler functions for film-related API endpoints.
//!
//! Bodies and query strings are handed to the `FilmService` raw; validation
//! happens there before any storage operation. Handlers only translate
//! service results into HTTP responses.

use std::collections::HashMap;

use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
    response::Json as ResponseJson,
};
use serde_json::Value;

use crate::api::common::{ApiMessage, ErrorResponse, service_error_to_http};
use crate::services::film_service::FilmService;
use crate::state::AppState;

/// Handle the film listing
#[axum::debug_handler]
pub async fn liste_films(
    Extension(state): Extension<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<ResponseJson<Vec<Value>>, (StatusCode, ResponseJson<ErrorResponse>)> {
    let params: serde_json::Map<String, Value> = params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();

    match FilmService::new(&state.pool)
        .list(&Value::Object(params))
        .await
    {
        Ok(films) => Ok(ResponseJson(films)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle a single film lookup
#[axum::debug_handler]
pub async fn film(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<ResponseJson<Value>, (StatusCode, ResponseJson<ErrorResponse>)> {
    match FilmService::new(&state.pool).get(&id).await {
        Ok(film) => Ok(ResponseJson(film)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle film creation
#[axum::debug_handler]
pub async fn ajouter_film(
    Extension(state): Extension<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, ResponseJson<Value>), (StatusCode, ResponseJson<ErrorResponse>)> {
    match FilmService::new(&state.pool).create(&payload).await {
        Ok(film) => Ok((StatusCode::CREATED, ResponseJson(film))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle film modification
#[axum::debug_handler]
pub async fn modifier_film(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<ResponseJson<Value>, (StatusCode, ResponseJson<ErrorResponse>)> {
    match FilmService::new(&state.pool).update(&id, &payload).await {
        Ok(film) => Ok(ResponseJson(film)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle film deletion
#[axum::debug_handler]
pub async fn supprimer_film(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiMessage>, (StatusCode, ResponseJson<ErrorResponse>)> {
    match FilmService::new(&state.pool).delete(&id).await {
        Ok(id) => Ok(ResponseJson(ApiMessage::new(format!(
            "Film avec l'ID {id} supprimé"
        )))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle loading the starter catalogue
#[axum::debug_handler]
pub async fn ajouter_films(
    Extension(state): Extension<AppState>,
) -> Result<(StatusCode, ResponseJson<Vec<Value>>), (StatusCode, ResponseJson<ErrorResponse>)> {
    match FilmService::new(&state.pool).seed().await {
        Ok(films) => Ok((StatusCode::CREATED, ResponseJson(films))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
