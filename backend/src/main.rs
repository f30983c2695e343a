//! Main entry point for the Cinéthèque backend.
//!
//! This file initializes the Axum web server, opens the database, and
//! registers all API routes and middleware.
//! It orchestrates the application's startup and defines its overall structure.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod state;
mod utils;
mod validation;

use axum::handler::HandlerWithoutStateExt;
use axum::http::{StatusCode, Uri};
use axum::response::Html;
use axum::{Extension, Router};
use config::Config;
use database::Database;
use state::AppState;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() {
    init();

    let config = Config::from_env().unwrap();
    let db = Database::new(&config).await.unwrap();
    let state = AppState::new(&config, db.pool().clone()).unwrap();

    let app = router(&config.public_dir, state);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    info!("Starting cinetheque server on port {}", config.server_port);
    axum::serve(listener, app).await.unwrap();
}

/// Assembles the full application: domain routers, then static files, then
/// the 404 page for anything left.
fn router(public_dir: &str, state: AppState) -> Router {
    let static_files = ServeDir::new(public_dir).not_found_service(page_404.into_service());

    Router::new()
        .nest("/films", api::films::routes::films_router())
        .nest("/utilisateurs", auth::routes::utilisateurs_router())
        .fallback_service(static_files)
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}

/// Template for the fallback page, bundled with the binary.
const PAGE_404: &str = include_str!("../templates/404.html");

/// Renders the French 404 page with the requested path escaped into it.
async fn page_404(uri: Uri) -> (StatusCode, Html<String>) {
    let body = PAGE_404.replace("{url}", &validation::escape(uri.path()));
    (StatusCode::NOT_FOUND, Html(body))
}
