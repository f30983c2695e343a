//! Database connection management.
//!
//! Opens the SQLite pool and prepares the single `documents` table every
//! collection lives in. Documents are stored as JSON text keyed by
//! collection name and identifier, so new collections need no migration.

pub mod models;

use anyhow::Context;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::time::Duration;

use crate::config::Config;

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS documents (
    collection TEXT NOT NULL,
    id TEXT NOT NULL,
    data TEXT NOT NULL,
    PRIMARY KEY (collection, id)
)";

/// Database connection wrapper holding the connection pool.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool described by `config` and ensures the schema exists.
    ///
    /// # Arguments
    /// * `config` - Application configuration with connection settings
    ///
    /// # Returns
    /// * `anyhow::Result<Self>` - Connected database or connection error
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(&config.database_url)
            .await
            .with_context(|| format!("failed to open database at {}", config.database_url))?;

        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .context("failed to initialize the documents table")?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// In-memory pool with the schema applied, for tests. A single connection
/// keeps every query on the same in-memory database.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    sqlx::query(SCHEMA)
        .execute(&pool)
        .await
        .expect("documents table");
    pool
}
