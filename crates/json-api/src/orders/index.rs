//! Order History Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use storefront_app::domain::orders::models::Order;

use crate::{basket::BasketResponse, extensions::*, state::State};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub id: i64,

    pub username: String,

    /// Calendar date the order was placed, `YYYY-MM-DD`
    pub date: String,

    /// Basket as it was at checkout
    pub basket: BasketResponse,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id,
            username: order.username,
            date: order.date.to_string(),
            basket: order.basket.into(),
        }
    }
}

/// Order History Handler
///
/// The logged-in user's orders, newest first.
#[endpoint(tags("orders"), summary = "List Orders")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_500()?;

    let orders = state
        .app
        .orders
        .list_orders(&user.name)
        .await
        .or_500("failed to fetch orders")?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::{
        baskets::models::Basket,
        orders::{MockOrdersService, OrdersServiceError},
    };
    use testresult::TestResult;

    use crate::test_helpers::{MockApp, TEST_USERNAME};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        MockApp::new()
            .orders(orders)
            .service(Router::with_path("orders").get(handler))
    }

    fn make_order(id: i64) -> Order {
        Order {
            id,
            username: TEST_USERNAME.to_string(),
            date: date(2026, 10, 19),
            basket: Basket::default(),
        }
    }

    #[tokio::test]
    async fn test_orders_are_listed_for_session_user() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|username| username == TEST_USERNAME)
            .return_once(|_| Ok(vec![make_order(2), make_order(1)]));

        let response: Vec<OrderResponse> = TestClient::get("http://example.com/orders")
            .send(&make_service(orders))
            .await
            .take_json()
            .await?;

        assert_eq!(response.len(), 2);
        assert_eq!(response.first().map(|order| order.id), Some(2));
        assert_eq!(
            response.first().map(|order| order.date.as_str()),
            Some("2026-10-19")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_error_returns_500() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .return_once(|_| Err(OrdersServiceError::Sql(sqlx::Error::PoolClosed)));

        let res = TestClient::get("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
