//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, DEFAULT_STARTING_WALLET, PgAuthService},
    database::{self, Db, Liveness},
    domain::{
        baskets::{BasketsService, PgBasketsService},
        checkout::{CheckoutService, PgCheckoutService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
    },
    sessions::SessionTable,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

/// Tunables that are not connection details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSettings {
    pub starting_wallet: i64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            starting_wallet: DEFAULT_STARTING_WALLET,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub liveness: Arc<dyn Liveness>,
    pub products: Arc<dyn ProductsService>,
    pub baskets: Arc<dyn BasketsService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub auth: Arc<dyn AuthService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Wire every service to one database handle and one session table.
    #[must_use]
    pub fn new(db: Db, settings: AppSettings) -> Self {
        let sessions = SessionTable::new();

        Self {
            liveness: Arc::new(db.clone()),
            products: Arc::new(PgProductsService::new(db.clone())),
            baskets: Arc::new(PgBasketsService::new(db.clone(), sessions.clone())),
            checkout: Arc::new(PgCheckoutService::new(db.clone(), sessions.clone())),
            auth: Arc::new(PgAuthService::new(
                db.clone(),
                sessions,
                settings.starting_wallet,
            )),
            orders: Arc::new(PgOrdersService::new(db)),
        }
    }

    /// Build application context from a database URL, applying migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(url: &str, settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migration)?;

        Ok(Self::new(Db::new(pool), settings))
    }
}
