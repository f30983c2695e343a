//! Defines the HTTP routes for accounts.
//!
//! These routes cover account listing, registration, and login. They are
//! designed to be nested under `/utilisateurs` in the main Axum router.

use crate::auth::handlers::*;
use axum::{
    Router,
    routing::{get, post},
};

/// Creates the account router with all account-related routes
pub fn utilisateurs_router() -> Router {
    Router::new()
        .route("/", get(liste_utilisateurs))
        .route("/inscription", post(inscription))
        .route("/connexion", post(connexion))
}
