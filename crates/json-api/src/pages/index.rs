//! Home Page Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use storefront_app::sessions::UserInfo;

use crate::{
    basket::{self, BasketResponse},
    extensions::*,
    products::{self, ProductResponse},
    state::State,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub name: String,

    /// Spendable balance in the smallest currency unit
    pub wallet: i64,
}

impl From<UserInfo> for UserResponse {
    fn from(user: UserInfo) -> Self {
        UserResponse {
            name: user.name,
            wallet: user.wallet,
        }
    }
}

/// Everything the storefront page shows for one session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PageResponse {
    pub user: UserResponse,

    /// Catalog in the session's sort order
    pub products: Vec<ProductResponse>,

    pub basket: BasketResponse,
}

/// Home Page Handler
#[endpoint(tags("pages"), summary = "Storefront Page")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;
    let user = depot.user_or_500()?.clone();

    let products = state
        .app
        .products
        .list_products(depot.session_order_by())
        .await
        .map_err(products::into_status_error)?;

    let basket = state
        .app
        .baskets
        .get_basket(session)
        .await
        .map_err(basket::into_status_error)?;

    Ok(Json(PageResponse {
        user: user.into(),
        products: products.into_iter().map(Into::into).collect(),
        basket: basket.into(),
    }))
}
