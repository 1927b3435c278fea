//! Database connection management

use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, Postgres, Transaction, migrate::MigrateError, query};

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when no connection can be acquired or `BEGIN` fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}

#[async_trait]
impl Liveness for Db {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        query("SELECT 1").execute(&self.pool).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait Liveness: Send + Sync {
    /// Round-trip a trivial statement to prove the database is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply the embedded schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
