pub mod repositories;

use std::{fmt, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::error::{StoreError, StoreResult};
use repositories::user_accounts::PostgresUserAccountsRepository;

/// Owns the connection pool shared by every request.
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    max_connections: u32,
    user_accounts: PostgresUserAccountsRepository,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl PostgresDatabase {
    /// Open the pool and verify the server answers.
    pub async fn new(
        connection_string: &str,
        max_connections: u32,
    ) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .max_lifetime(Duration::from_secs(1800))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(connection_string)
            .await
            .map_err(|e| {
                StoreError::Database(format!("Database connection failed: {}", e))
            })?;

        let database = Self::from_pool(pool, max_connections);
        database.ping().await?;

        info!(max_connections, "Database pool initialized");
        Ok(database)
    }

    pub fn from_pool(pool: PgPool, max_connections: u32) -> Self {
        let user_accounts = PostgresUserAccountsRepository::new(pool.clone());
        Self {
            pool,
            max_connections,
            user_accounts,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn user_accounts(&self) -> PostgresUserAccountsRepository {
        self.user_accounts.clone()
    }

    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                StoreError::Database(format!(
                    "Database ping failed: {}",
                    e
                ))
            })?;
        Ok(())
    }
}
