//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use storefront_app::domain::products::models::{Product, SortColumn};

use crate::{extensions::*, products::into_status_error, state::State};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// Product key
    pub pk: i64,

    pub title: String,

    /// Free-form product type
    #[serde(rename = "type")]
    pub kind: String,

    /// Unit price in the smallest currency unit
    pub price: i64,

    /// Units in stock
    pub quantity: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            pk: product.pk,
            title: product.title,
            kind: product.kind,
            price: product.price,
            quantity: product.quantity,
        }
    }
}

/// Product Index Handler
///
/// Lists the catalog and remembers the sort column for the home page. Any
/// `orderBy` outside `title`, `type`, `quantity` and `price` sorts by key.
#[endpoint(
    tags("products"),
    summary = "List Products",
    parameters(("orderBy" = Option<String>, Query, description = "Sort column")),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let sort = SortColumn::from_param(req.query::<String>("orderBy").as_deref());

    depot.set_session_order_by(sort)?;

    let products = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .products
        .list_products(sort)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::products::{MockProductsService, ProductsServiceError};
    use testresult::TestResult;

    use crate::test_helpers::{MockApp, make_product};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        MockApp::new()
            .products(products)
            .service(Router::with_path("products").get(handler))
    }

    #[test]
    fn test_openapi_documents_amounts_in_smallest_units() -> TestResult {
        let router = Router::with_path("products").get(handler);

        let json = salvo::oapi::OpenApi::new("test", "0.0.0")
            .merge_router(&router)
            .to_json()?;

        assert!(json.contains("Unit price in the smallest currency unit"), "schema was {json}");
        assert!(!json.contains("whole currency"), "schema was {json}");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_products_in_service_order() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|sort| *sort == SortColumn::Price)
            .return_once(|_| Ok(vec![make_product(2, "Tea", 3), make_product(1, "Coffee", 4)]));

        products.expect_get_product().never();
        products.expect_create_product().never();

        let response: Vec<ProductResponse> =
            TestClient::get("http://example.com/products?orderBy=price")
                .send(&make_service(products))
                .await
                .take_json()
                .await?;

        let keys: Vec<i64> = response.iter().map(|product| product.pk).collect();

        assert_eq!(keys, vec![2, 1]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_serializes_kind_as_type() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_| Ok(vec![make_product(1, "Tea", 3)]));

        let body = TestClient::get("http://example.com/products?orderBy=title")
            .send(&make_service(products))
            .await
            .take_string()
            .await?;

        assert!(body.contains("\"type\":\"drink\""), "body was {body}");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_order_by_falls_back_to_key() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|sort| *sort == SortColumn::Key)
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get("http://example.com/products?orderBy=secret;DROP")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_order_by_falls_back_to_key() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|sort| *sort == SortColumn::Key)
            .return_once(|_| Ok(vec![]));

        let response: Vec<ProductResponse> = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert!(response.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
