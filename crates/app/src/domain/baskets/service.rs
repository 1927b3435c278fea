//! Baskets service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        baskets::{
            errors::BasketsServiceError,
            models::{Basket, BasketItem},
        },
        products::repository::PgProductsRepository,
    },
    sessions::{SessionKey, SessionTable},
};

#[derive(Debug, Clone)]
pub struct PgBasketsService {
    db: Db,
    sessions: SessionTable,
    products_repository: PgProductsRepository,
}

impl PgBasketsService {
    #[must_use]
    pub fn new(db: Db, sessions: SessionTable) -> Self {
        Self {
            db,
            sessions,
            products_repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl BasketsService for PgBasketsService {
    async fn get_basket(&self, session: SessionKey) -> Result<Basket, BasketsServiceError> {
        self.sessions.with_state(session, |state| {
            state.basket.recompute_total()?;

            Ok(state.basket.clone())
        })
    }

    async fn add_item(
        &self,
        session: SessionKey,
        pk: i64,
    ) -> Result<BasketItem, BasketsServiceError> {
        if self.sessions.snapshot(session).basket.contains(pk) {
            return Err(BasketsServiceError::AlreadyInBasket(pk));
        }

        let mut tx = self.db.begin().await?;

        let product = self.products_repository.get_product(&mut tx, pk).await?;

        tx.commit().await?;

        self.sessions
            .with_state(session, |state| state.basket.add_item(product))
    }

    async fn remove_item(&self, session: SessionKey, pk: i64) -> Result<(), BasketsServiceError> {
        self.sessions.with_state(session, |state| {
            state.basket.remove_item(pk);
        });

        Ok(())
    }

    async fn set_quantity(
        &self,
        session: SessionKey,
        pk: i64,
        quantity: Option<i64>,
    ) -> Result<BasketItem, BasketsServiceError> {
        self.sessions
            .with_state(session, |state| state.basket.set_quantity(pk, quantity))
    }
}

#[automock]
#[async_trait]
pub trait BasketsService: Send + Sync {
    /// The session's basket with its total freshly computed.
    async fn get_basket(&self, session: SessionKey) -> Result<Basket, BasketsServiceError>;

    /// Put a catalog product in the session's basket with quantity 1.
    async fn add_item(&self, session: SessionKey, pk: i64)
    -> Result<BasketItem, BasketsServiceError>;

    /// Drop a product from the session's basket. Unknown keys are ignored.
    async fn remove_item(&self, session: SessionKey, pk: i64) -> Result<(), BasketsServiceError>;

    /// Change how many of a product the session wants.
    async fn set_quantity(
        &self,
        session: SessionKey,
        pk: i64,
        quantity: Option<i64>,
    ) -> Result<BasketItem, BasketsServiceError>;
}
