//! Data models for film requests.

use serde::{Deserialize, Serialize};

/// A film as accepted and stored, shaped from a validated request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmPayload {
    pub titre: String,
    pub genres: Vec<String>,
    pub description: String,
    pub annee: String,
    pub realisation: String,
    #[serde(rename = "titreVignette")]
    pub titre_vignette: String,
}

/// Accepted query parameters for the film listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListeFilmsParams {
    pub limit: Option<i64>,
    #[serde(rename = "orderDirection")]
    pub order_direction: Option<String>,
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
}
