//! Middleware for protecting authenticated routes.
//!
//! This module validates bearer tokens on mutating endpoints. Verification
//! is purely cryptographic and local; the middleware never touches storage,
//! so it cannot block on I/O.

use axum::{
    extract::{Extension, Request},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{Json, Response},
};

use crate::api::common::{ErrorResponse, service_error_to_http};
use crate::errors::ServiceError;
use crate::state::AppState;

/// Bearer token authentication middleware.
///
/// On success the verified claims are attached to the request for handlers
/// downstream. A missing header, a header without the bearer scheme, and a
/// failed verification all get the same generic 401, leaking nothing about
/// which check failed.
pub async fn jwt_auth(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or_else(|| service_error_to_http(ServiceError::Unauthorized))?;

    match state.tokens.verify(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(_) => Err(service_error_to_http(ServiceError::Unauthorized)),
    }
}
