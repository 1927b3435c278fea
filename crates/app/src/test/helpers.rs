//! Test Helpers

use crate::{
    auth::{AuthService, AuthServiceError, Credentials},
    domain::products::{
        ProductsService, ProductsServiceError,
        models::{NewProduct, Product},
    },
    sessions::{SessionKey, UserInfo},
    test::TestContext,
};

pub(crate) async fn create_product(
    ctx: &TestContext,
    title: &str,
    price: i64,
    quantity: i64,
) -> Result<Product, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            title: title.to_string(),
            kind: "test".to_string(),
            price,
            quantity,
        })
        .await
}

/// Register `username` with the default wallet and log them in to `session`.
pub(crate) async fn log_in(
    ctx: &TestContext,
    session: SessionKey,
    username: &str,
) -> Result<UserInfo, AuthServiceError> {
    ctx.auth
        .register(Credentials::new(username, "secret"))
        .await?;

    ctx.auth
        .login(session, Credentials::new(username, "secret"))
        .await
}
