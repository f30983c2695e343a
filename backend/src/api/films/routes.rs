//! Defines the HTTP routes for the film catalogue.
//!
//! Reads are open; every mutation sits behind the bearer token middleware.
//! These routes are designed to be nested under `/films` in the main router.

use crate::api::films::handlers::*;
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

/// Creates the film router with all film-related routes
pub fn films_router() -> Router {
    Router::new()
        .route("/liste-films", get(liste_films))
        .route("/film/{id}", get(film))
        .route(
            "/ajouter-film",
            post(ajouter_film).layer(middleware::from_fn(jwt_auth)),
        )
        .route(
            "/modifier-film/{id}",
            put(modifier_film).layer(middleware::from_fn(jwt_auth)),
        )
        .route(
            "/supprimer-film/{id}",
            delete(supprimer_film).layer(middleware::from_fn(jwt_auth)),
        )
        .route("/ajouter-films", post(ajouter_films))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AppState, test_state};
    use crate::utils::jwt::Claims;
    use axum::Extension;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn app() -> (Router, AppState) {
        let state = test_state().await;
        let app = Router::new()
            .nest("/films", films_router())
            .layer(Extension(state.clone()));
        (app, state)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn film(titre: &str) -> Value {
        json!({
            "titre": titre,
            "genres": ["Drame"],
            "description": "Un film québécois.",
            "annee": "2010",
            "realisation": "Réalisateur",
            "titreVignette": "vignette.jpg",
        })
    }

    fn expired_token() -> String {
        let secret = crate::config::test_config().jwt_secret;
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "compte-test".to_string(),
            exp: now - 60,
            iat: now - 120,
        };
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn mutations_require_a_bearer_token() {
        let (app, state) = app().await;

        let (status, body) =
            send(&app, "POST", "/films/ajouter-film", None, Some(film("X"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Accès non autorisé");

        let expired = expired_token();
        let (status, _) = send(
            &app,
            "POST",
            "/films/ajouter-film",
            Some(&expired),
            Some(film("X")),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let mut other_config = crate::config::test_config();
        other_config.jwt_secret = "autre-secret".to_string();
        let foreign = crate::utils::jwt::TokenService::new(&other_config)
            .issue("compte-test")
            .unwrap();
        let (status, _) = send(
            &app,
            "POST",
            "/films/ajouter-film",
            Some(&foreign),
            Some(film("X")),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let valid = state.tokens.issue("compte-test").unwrap();
        let (status, _) = send(
            &app,
            "POST",
            "/films/ajouter-film",
            Some(&valid),
            Some(film("X")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn reads_are_open_without_a_token() {
        let (app, _) = app().await;

        let (status, body) = send(&app, "GET", "/films/liste-films", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = send(&app, "GET", "/films/film/absent", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Film non trouvé");
    }

    #[tokio::test]
    async fn the_full_crud_cycle_works_end_to_end() {
        let (app, state) = app().await;
        let token = state.tokens.issue("compte-test").unwrap();

        let (status, created) = send(
            &app,
            "POST",
            "/films/ajouter-film",
            Some(&token),
            Some(film("Incendies")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, fetched) = send(&app, "GET", &format!("/films/film/{id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["titre"], "Incendies");

        let mut changes = film("Incendies");
        changes["annee"] = json!("2011");
        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/films/modifier-film/{id}"),
            Some(&token),
            Some(changes),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["annee"], "2011");

        let (status, body) = send(
            &app,
            "DELETE",
            &format!("/films/supprimer-film/{id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], format!("Film avec l'ID {id} supprimé"));

        let (status, _) = send(&app, "GET", &format!("/films/film/{id}"), None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn an_invalid_film_body_reports_the_rejected_fields() {
        let (app, state) = app().await;
        let token = state.tokens.issue("compte-test").unwrap();

        let (status, body) = send(
            &app,
            "POST",
            "/films/ajouter-film",
            Some(&token),
            Some(json!({ "titre": "Seul" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Données invalides");
        assert_eq!(body["erreurs"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn the_starter_catalogue_loads_without_a_token() {
        let (app, _) = app().await;

        let (status, body) = send(&app, "POST", "/films/ajouter-films", None, None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(!body.as_array().unwrap().is_empty());

        let (_, listed) = send(&app, "GET", "/films/liste-films", None, None).await;
        assert_eq!(listed.as_array().unwrap().len(), body.as_array().unwrap().len());
    }
}
