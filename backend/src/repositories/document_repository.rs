//! Generic JSON document access layer.
//!
//! Every collection shares the `documents` table; rows are addressed by
//! (collection, id) and filtered or ordered through `json_extract` over the
//! stored body. Identifiers are generated here as sortable UUIDs.

use std::str::FromStr;

use serde_json::Value;
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::Document;

/// Sort order for listings, parsed from the wire form `asc`/`desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown sort direction: {0}")]
pub struct UnknownSortDirection(String);

impl FromStr for SortDirection {
    type Err = UnknownSortDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            other => Err(UnknownSortDirection(other.to_string())),
        }
    }
}

/// Data access for one named collection of JSON documents.
pub struct DocumentRepository<'a> {
    pool: &'a SqlitePool,
    collection: &'a str,
}

impl<'a> DocumentRepository<'a> {
    /// Creates a repository over `collection`.
    ///
    /// # Arguments
    /// * `pool` - Database connection pool
    /// * `collection` - Name of the collection this repository serves
    pub fn new(pool: &'a SqlitePool, collection: &'a str) -> Self {
        Self { pool, collection }
    }

    /// Inserts `data` under a newly generated identifier.
    ///
    /// # Returns
    /// * `anyhow::Result<Document>` - The stored document with its identifier
    pub async fn insert(&self, data: &Value) -> anyhow::Result<Document> {
        let id = Uuid::now_v7().to_string();
        sqlx::query("INSERT INTO documents (collection, id, data) VALUES (?, ?, ?)")
            .bind(self.collection)
            .bind(&id)
            .bind(data.to_string())
            .execute(self.pool)
            .await?;

        Ok(Document {
            id,
            data: data.clone(),
        })
    }

    /// Fetches one document by identifier.
    pub async fn get(&self, id: &str) -> anyhow::Result<Option<Document>> {
        let row = sqlx::query("SELECT id, data FROM documents WHERE collection = ? AND id = ?")
            .bind(self.collection)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(row_to_document).transpose()
    }

    /// Returns every document whose body field `field` equals `value`.
    pub async fn find_by_field(&self, field: &str, value: &str) -> anyhow::Result<Vec<Document>> {
        let rows = sqlx::query(
            "SELECT id, data FROM documents WHERE collection = ? AND json_extract(data, ?) = ?",
        )
        .bind(self.collection)
        .bind(json_path(field))
        .bind(value)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(row_to_document).collect()
    }

    /// Lists documents ordered by a body field, capped at `limit`.
    pub async fn list(
        &self,
        order_by: &str,
        direction: SortDirection,
        limit: i64,
    ) -> anyhow::Result<Vec<Document>> {
        let sql = format!(
            "SELECT id, data FROM documents WHERE collection = ? \
             ORDER BY json_extract(data, ?) {} LIMIT ?",
            direction.as_sql()
        );
        let rows = sqlx::query(&sql)
            .bind(self.collection)
            .bind(json_path(order_by))
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(row_to_document).collect()
    }

    /// Lists every document in the collection, in identifier order.
    pub async fn list_all(&self) -> anyhow::Result<Vec<Document>> {
        let rows = sqlx::query("SELECT id, data FROM documents WHERE collection = ? ORDER BY id")
            .bind(self.collection)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(row_to_document).collect()
    }

    /// Merges `changes` into an existing document's top-level fields. Array
    /// and scalar fields are replaced wholesale; `null` change values remove
    /// a field, so callers only pass validated payloads.
    ///
    /// # Returns
    /// * `Ok(None)` - No document has this identifier
    pub async fn update(&self, id: &str, changes: &Value) -> anyhow::Result<Option<Document>> {
        let result = sqlx::query(
            "UPDATE documents SET data = json_patch(data, ?) WHERE collection = ? AND id = ?",
        )
        .bind(changes.to_string())
        .bind(self.collection)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    /// Deletes by identifier. Deleting an absent document is not an error.
    pub async fn delete(&self, id: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(self.collection)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}

fn json_path(field: &str) -> String {
    format!("$.{field}")
}

fn row_to_document(row: sqlx::sqlite::SqliteRow) -> anyhow::Result<Document> {
    let id: String = row.get("id");
    let raw: String = row.get("data");
    let data = serde_json::from_str(&raw)?;
    Ok(Document { id, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use serde_json::json;

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let pool = test_pool().await;
        let films = DocumentRepository::new(&pool, "films");

        let stored = films.insert(&json!({ "titre": "Incendies" })).await.unwrap();
        let fetched = films.get(&stored.id).await.unwrap().unwrap();

        assert_eq!(fetched, stored);
    }

    #[tokio::test]
    async fn get_returns_none_for_an_unknown_id() {
        let pool = test_pool().await;
        let films = DocumentRepository::new(&pool, "films");

        assert!(films.get("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn collections_do_not_see_each_other() {
        let pool = test_pool().await;
        let films = DocumentRepository::new(&pool, "films");
        let comptes = DocumentRepository::new(&pool, "utilisateurs");

        let stored = films.insert(&json!({ "titre": "CRAZY" })).await.unwrap();

        assert!(comptes.get(&stored.id).await.unwrap().is_none());
        assert_eq!(comptes.list_all().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn find_by_field_matches_exact_values() {
        let pool = test_pool().await;
        let comptes = DocumentRepository::new(&pool, "utilisateurs");

        comptes
            .insert(&json!({ "courriel": "a@b.com", "mdp": "h1" }))
            .await
            .unwrap();
        comptes
            .insert(&json!({ "courriel": "c@d.com", "mdp": "h2" }))
            .await
            .unwrap();

        let found = comptes.find_by_field("courriel", "a@b.com").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].data["courriel"], "a@b.com");

        let none = comptes.find_by_field("courriel", "z@z.com").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn list_orders_by_the_requested_field() {
        let pool = test_pool().await;
        let films = DocumentRepository::new(&pool, "films");

        for titre in ["Cèdre", "Aurore", "Bonheur"] {
            films.insert(&json!({ "titre": titre })).await.unwrap();
        }

        let ascending = films.list("titre", SortDirection::Ascending, 10).await.unwrap();
        let titres: Vec<&str> = ascending
            .iter()
            .map(|d| d.data["titre"].as_str().unwrap())
            .collect();
        assert_eq!(titres, ["Aurore", "Bonheur", "Cèdre"]);

        let descending = films
            .list("titre", SortDirection::Descending, 10)
            .await
            .unwrap();
        assert_eq!(descending[0].data["titre"], "Cèdre");
    }

    #[tokio::test]
    async fn list_applies_the_limit() {
        let pool = test_pool().await;
        let films = DocumentRepository::new(&pool, "films");

        for titre in ["A", "B", "C"] {
            films.insert(&json!({ "titre": titre })).await.unwrap();
        }

        let limited = films.list("titre", SortDirection::Ascending, 2).await.unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn update_merges_top_level_fields() {
        let pool = test_pool().await;
        let films = DocumentRepository::new(&pool, "films");

        let stored = films
            .insert(&json!({ "titre": "Incendies", "annee": "2010", "genres": ["Drame", "Guerre"] }))
            .await
            .unwrap();

        let updated = films
            .update(&stored.id, &json!({ "annee": "2011", "genres": ["Drame"] }))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.data["titre"], "Incendies");
        assert_eq!(updated.data["annee"], "2011");
        assert_eq!(updated.data["genres"], json!(["Drame"]));
    }

    #[tokio::test]
    async fn update_returns_none_for_an_unknown_id() {
        let pool = test_pool().await;
        let films = DocumentRepository::new(&pool, "films");

        let outcome = films.update("absent", &json!({ "titre": "X" })).await.unwrap();
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn delete_removes_and_stays_quiet_when_absent() {
        let pool = test_pool().await;
        let films = DocumentRepository::new(&pool, "films");

        let stored = films.insert(&json!({ "titre": "Incendies" })).await.unwrap();
        films.delete(&stored.id).await.unwrap();

        assert!(films.get(&stored.id).await.unwrap().is_none());
        films.delete(&stored.id).await.unwrap();
    }

    #[test]
    fn sort_direction_parses_case_insensitively() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Ascending);
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Descending);
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}
