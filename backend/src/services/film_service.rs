//! Film business logic service.
//!
//! Handles listing, lookup, creation, modification, and deletion of film
//! documents, plus loading the bundled starter catalogue.

use anyhow::Context;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::api::films::models::{FilmPayload, ListeFilmsParams};
use crate::database::models::Document;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::document_repository::{DocumentRepository, SortDirection};
use crate::validation::{self, FieldRules, Rule, ValidationErrors};

/// Collection holding one document per film.
pub const COLLECTION: &str = "Films";

const DEFAULT_ORDER_BY: &str = "titre";
const DEFAULT_LIMIT: i64 = 100;

/// Starter catalogue bundled with the binary.
const FILMS_DEPART: &str = include_str!("../../data/films_depart.json");

const LISTE_RULES: &[FieldRules] = &[
    FieldRules::optional("limit", &[Rule::IsInt]),
    FieldRules::optional("orderDirection", &[Rule::IsString]),
    FieldRules::optional("orderBy", &[Rule::IsString]),
];

const TEXTE_RULES: &[Rule] = &[Rule::NotEmpty, Rule::IsString];

const FILM_RULES: &[FieldRules] = &[
    FieldRules::required("titre", TEXTE_RULES),
    FieldRules::required("genres", &[Rule::IsArray]),
    FieldRules::required("description", TEXTE_RULES),
    FieldRules::required("annee", TEXTE_RULES),
    FieldRules::required("realisation", TEXTE_RULES),
    FieldRules::required("titreVignette", TEXTE_RULES),
];

/// Film service handling the catalogue's CRUD operations.
pub struct FilmService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> FilmService<'a> {
    /// Creates a new FilmService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    fn films(&self) -> DocumentRepository<'_> {
        DocumentRepository::new(self.pool, COLLECTION)
    }

    /// Lists films ordered by a body field.
    ///
    /// # Arguments
    /// * `params` - Raw query parameters; `orderBy` defaults to `titre`,
    ///   `orderDirection` to ascending, `limit` to 100
    ///
    /// # Returns
    /// * `ServiceResult<Vec<Value>>` - Film bodies with their identifiers
    pub async fn list(&self, params: &Value) -> ServiceResult<Vec<Value>> {
        let normalized = validation::validate(params, LISTE_RULES)?;
        let params: ListeFilmsParams = serde_json::from_value(normalized)
            .context("normalized listing parameters did not match their shape")?;

        let direction = match params.order_direction.as_deref() {
            Some(raw) => raw.parse::<SortDirection>().map_err(|_| {
                ValidationErrors::single("orderDirection", "doit être asc ou desc")
            })?,
            None => SortDirection::default(),
        };
        let order_by = params.order_by.as_deref().unwrap_or(DEFAULT_ORDER_BY);
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT);

        let documents = self.films().list(order_by, direction, limit).await?;
        Ok(documents.into_iter().map(Document::into_body).collect())
    }

    /// Fetches one film's stored body. The identifier is not echoed back.
    pub async fn get(&self, raw_id: &str) -> ServiceResult<Value> {
        let id = validation::sanitize_id(raw_id)?;
        let document = self
            .films()
            .get(&id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Film", &id))?;
        Ok(document.data)
    }

    /// Validates and stores a new film.
    pub async fn create(&self, payload: &Value) -> ServiceResult<Value> {
        let film = shape_film(validation::validate(payload, FILM_RULES)?)?;
        let document = self
            .films()
            .insert(&serde_json::to_value(&film).context("serialize film")?)
            .await?;
        Ok(document.into_body())
    }

    /// Validates and applies a full set of field changes to a film.
    pub async fn update(&self, raw_id: &str, payload: &Value) -> ServiceResult<Value> {
        let id = validation::sanitize_id(raw_id)?;
        let film = shape_film(validation::validate(payload, FILM_RULES)?)?;

        let document = self
            .films()
            .update(&id, &serde_json::to_value(&film).context("serialize film")?)
            .await?
            .ok_or_else(|| ServiceError::not_found("Film", &id))?;
        Ok(document.into_body())
    }

    /// Deletes a film and returns the sanitized identifier for the
    /// confirmation message. Absent identifiers delete without complaint.
    pub async fn delete(&self, raw_id: &str) -> ServiceResult<String> {
        let id = validation::sanitize_id(raw_id)?;
        self.films().delete(&id).await?;
        Ok(id)
    }

    /// Loads the bundled starter catalogue, one document per film.
    pub async fn seed(&self) -> ServiceResult<Vec<Value>> {
        let films: Vec<FilmPayload> = serde_json::from_str(FILMS_DEPART)
            .context("bundled starter catalogue is not readable")?;

        let repository = self.films();
        let mut created = Vec::with_capacity(films.len());
        for film in &films {
            let document = repository
                .insert(&serde_json::to_value(film).context("serialize film")?)
                .await?;
            created.push(document.into_body());
        }
        Ok(created)
    }
}

/// After rule validation only the genre elements can still have the wrong
/// type, so a shaping failure is reported against that field.
fn shape_film(normalized: Value) -> ServiceResult<FilmPayload> {
    serde_json::from_value(normalized).map_err(|_| {
        ValidationErrors::single("genres", "doit être un tableau de chaînes de caractères").into()
    })
}
