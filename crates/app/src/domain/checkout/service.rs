//! Checkout service.

use std::collections::BTreeMap;

use async_trait::async_trait;
use jiff::Zoned;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        checkout::{errors::CheckoutServiceError, plan::plan_checkout},
        orders::{
            models::{NewOrder, Order},
            repository::PgOrdersRepository,
        },
        products::repository::PgProductsRepository,
        users::repository::PgUsersRepository,
    },
    sessions::{SessionKey, SessionTable},
};

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    sessions: SessionTable,
    users_repository: PgUsersRepository,
    products_repository: PgProductsRepository,
    orders_repository: PgOrdersRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db, sessions: SessionTable) -> Self {
        Self {
            db,
            sessions,
            users_repository: PgUsersRepository::new(),
            products_repository: PgProductsRepository::new(),
            orders_repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    async fn checkout(&self, session: SessionKey) -> Result<Order, CheckoutServiceError> {
        let claim = self
            .sessions
            .claim_basket(session)
            .ok_or(CheckoutServiceError::CheckoutInProgress)?;

        let user = claim
            .user()
            .cloned()
            .ok_or(CheckoutServiceError::Unauthenticated)?;

        let mut basket = claim.basket().clone();

        basket
            .recompute_total()
            .map_err(|_| CheckoutServiceError::TotalOverflow)?;

        let mut tx = self.db.begin().await?;

        // Wallet first, then products in key order.
        let wallet = self
            .users_repository
            .lock_wallet(&mut tx, &user.name)
            .await?
            .ok_or_else(|| CheckoutServiceError::NoSuchUser(user.name.clone()))?;

        let mut stock = BTreeMap::new();

        for pk in basket.items.keys() {
            if let Some(product) = self.products_repository.lock_product(&mut tx, *pk).await? {
                stock.insert(*pk, product);
            }
        }

        let plan = plan_checkout(&basket, wallet, &stock)?;

        for (pk, quantity) in &plan.decrements {
            self.products_repository
                .decrement_stock(&mut tx, *pk, *quantity)
                .await?;
        }

        let remaining = self
            .users_repository
            .debit_wallet(&mut tx, &user.name, plan.total)
            .await?;

        let order = self
            .orders_repository
            .create_order(
                &mut tx,
                &NewOrder {
                    username: user.name.clone(),
                    date: Zoned::now().date(),
                    basket,
                },
            )
            .await?;

        tx.commit().await?;

        claim.complete(remaining);

        info!(
            order = order.id,
            username = %order.username,
            total = plan.total,
            wallet = remaining,
            "checkout committed"
        );

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Turn the session's basket into an order, all or nothing.
    ///
    /// Debits the logged-in user's wallet, decrements stock, and records the
    /// order in one transaction. On success the checked-out items leave the
    /// session's basket; on failure they stay. A session checks out one basket
    /// at a time.
    async fn checkout(&self, session: SessionKey) -> Result<Order, CheckoutServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{baskets::BasketsService, orders::OrdersService, products::ProductsService},
        sessions::SessionKey,
        test::{
            TestContext,
            helpers::{create_product, log_in},
        },
    };

    use super::*;

    #[tokio::test]
    async fn checkout_debits_wallet_and_decrements_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let session = SessionKey::new();
        let a = create_product(&ctx, "A", 10, 5).await?;

        log_in(&ctx, session, "alice").await?;

        ctx.baskets.add_item(session, a.pk).await?;
        ctx.baskets.set_quantity(session, a.pk, Some(2)).await?;

        let order = ctx.checkout.checkout(session).await?;

        assert_eq!(order.username, "alice");
        assert_eq!(order.basket.total, 20);
        assert_eq!(order.basket.items[&a.pk].quantity, 2);

        assert_eq!(ctx.products.get_product(a.pk).await?.quantity, 3);
        assert_eq!(ctx.sessions.user(session).map(|u| u.wallet), Some(80));
        assert!(ctx.baskets.get_basket(session).await?.is_empty());

        let orders = ctx.orders.list_orders("alice").await?;

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0], order);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_over_wallet_writes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let session = SessionKey::new();
        let a = create_product(&ctx, "A", 60, 5).await?;

        log_in(&ctx, session, "alice").await?;

        ctx.baskets.add_item(session, a.pk).await?;
        ctx.baskets.set_quantity(session, a.pk, Some(2)).await?;

        let result = ctx.checkout.checkout(session).await;

        assert!(
            matches!(
                result,
                Err(CheckoutServiceError::InsufficientFunds { total: 120, wallet: 100 })
            ),
            "expected InsufficientFunds, got {result:?}"
        );

        assert_eq!(ctx.products.get_product(a.pk).await?.quantity, 5);
        assert!(ctx.orders.list_orders("alice").await?.is_empty());
        assert_eq!(ctx.baskets.get_basket(session).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_over_stock_writes_nothing_for_any_item() -> TestResult {
        let ctx = TestContext::new().await;
        let session = SessionKey::new();
        let a = create_product(&ctx, "A", 1, 5).await?;
        let b = create_product(&ctx, "B", 1, 1).await?;

        log_in(&ctx, session, "alice").await?;

        ctx.baskets.add_item(session, a.pk).await?;
        ctx.baskets.add_item(session, b.pk).await?;
        ctx.baskets.set_quantity(session, b.pk, Some(2)).await?;

        let result = ctx.checkout.checkout(session).await;

        assert!(
            matches!(
                result,
                Err(CheckoutServiceError::InsufficientStock { pk, available: 1, .. }) if pk == b.pk
            ),
            "expected InsufficientStock, got {result:?}"
        );

        assert_eq!(ctx.products.get_product(a.pk).await?.quantity, 5);
        assert_eq!(ctx.products.get_product(b.pk).await?.quantity, 1);
        assert_eq!(ctx.sessions.user(session).map(|u| u.wallet), Some(100));
        assert!(ctx.orders.list_orders("alice").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn double_submit_places_one_order() -> TestResult {
        let ctx = TestContext::new().await;
        let session = SessionKey::new();
        let a = create_product(&ctx, "A", 10, 5).await?;

        log_in(&ctx, session, "alice").await?;

        ctx.baskets.add_item(session, a.pk).await?;
        ctx.baskets.set_quantity(session, a.pk, Some(2)).await?;

        let (first, second) = tokio::join!(
            ctx.checkout.checkout(session),
            ctx.checkout.checkout(session)
        );

        assert_eq!(usize::from(first.is_ok()) + usize::from(second.is_ok()), 1);
        assert!(
            matches!(
                (&first, &second),
                (Err(CheckoutServiceError::CheckoutInProgress), _)
                    | (_, Err(CheckoutServiceError::CheckoutInProgress))
            ),
            "expected one CheckoutInProgress, got {first:?} and {second:?}"
        );

        assert_eq!(ctx.orders.list_orders("alice").await?.len(), 1);
        assert_eq!(ctx.products.get_product(a.pk).await?.quantity, 3);
        assert_eq!(ctx.sessions.user(session).map(|u| u.wallet), Some(80));
        assert!(ctx.baskets.get_basket(session).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn checkout_after_user_is_gone_names_the_user() -> TestResult {
        let ctx = TestContext::new().await;
        let session = SessionKey::new();

        log_in(&ctx, session, "alice").await?;

        sqlx::query("DELETE FROM users WHERE username = $1")
            .bind("alice")
            .execute(ctx.db.pool())
            .await?;

        let result = ctx.checkout.checkout(session).await;

        assert!(
            matches!(&result, Err(CheckoutServiceError::NoSuchUser(name)) if name == "alice"),
            "expected NoSuchUser, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn checkout_without_login_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.checkout.checkout(SessionKey::new()).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );
    }

    #[tokio::test]
    async fn empty_basket_records_an_empty_order() -> TestResult {
        let ctx = TestContext::new().await;
        let session = SessionKey::new();

        log_in(&ctx, session, "alice").await?;

        let order = ctx.checkout.checkout(session).await?;

        assert!(order.basket.is_empty());
        assert_eq!(order.basket.total, 0);
        assert_eq!(ctx.sessions.user(session).map(|u| u.wallet), Some(100));

        Ok(())
    }
}
