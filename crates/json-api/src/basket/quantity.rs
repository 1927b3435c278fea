//! Set Basket Quantity Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    basket::{BasketItemResponse, into_status_error, parse_key},
    extensions::*,
    state::State,
};

/// Set Basket Quantity Handler
///
/// A missing, non-numeric or non-positive `quantity` is stored as 1. Stock is
/// not checked until checkout.
#[endpoint(
    tags("basket"),
    summary = "Set Basket Quantity",
    parameters(
        ("id" = String, Query, description = "Product key"),
        ("quantity" = Option<String>, Query, description = "Wanted quantity"),
    ),
    responses(
        (status_code = 200, description = "Quantity updated", body = BasketItemResponse),
        (status_code = 404, description = "Product not in basket"),
        (status_code = 500, description = "Malformed key"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<BasketItemResponse>, StatusError> {
    let pk = parse_key(req.query::<String>("id").as_deref())?;
    let quantity = req
        .query::<String>("quantity")
        .and_then(|raw| raw.parse::<i64>().ok());
    let session = depot.session_key_or_500()?;

    let item = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .baskets
        .set_quantity(session, pk, quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
