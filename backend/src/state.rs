//! Shared application state handed to every request handler.

use anyhow::Context;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::utils::jwt::TokenService;
use crate::utils::password::CredentialHasher;

/// Everything request handling needs, built once at startup: the connection
/// pool, the token signer, and the password hasher. Cloning is cheap and
/// every clone shares the same pool.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub tokens: TokenService,
    pub hasher: CredentialHasher,
}

impl AppState {
    /// Builds the state from the loaded configuration and an open pool.
    pub fn new(config: &Config, pool: SqlitePool) -> anyhow::Result<Self> {
        let tokens = TokenService::new(config);
        let hasher = CredentialHasher::new(config.bcrypt_cost)
            .context("failed to prepare the password hasher")?;

        Ok(Self {
            pool,
            tokens,
            hasher,
        })
    }
}

/// State over a fresh in-memory database with test-grade settings.
#[cfg(test)]
pub(crate) async fn test_state() -> AppState {
    let config = crate::config::test_config();
    let pool = crate::database::test_pool().await;
    AppState::new(&config, pool).expect("test state")
}
