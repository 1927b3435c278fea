//! Add Basket Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    basket::{BasketItemResponse, into_status_error, parse_key},
    extensions::*,
    state::State,
};

/// Add Basket Item Handler
///
/// Puts one unit of a catalog product into the session's basket.
#[endpoint(
    tags("basket"),
    summary = "Add Basket Item",
    responses(
        (status_code = 200, description = "Item added", body = BasketItemResponse),
        (status_code = 404, description = "Unknown product"),
        (status_code = 405, description = "Product already in basket"),
        (status_code = 500, description = "Malformed key or storage failure"),
    ),
)]
pub(crate) async fn handler(
    pk: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<BasketItemResponse>, StatusError> {
    let pk = parse_key(Some(&pk.into_inner()))?;
    let session = depot.session_key_or_500()?;

    let item = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .baskets
        .add_item(session, pk)
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
