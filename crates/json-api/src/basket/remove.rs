//! Remove Basket Item Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    basket::{into_status_error, parse_key},
    extensions::*,
    state::State,
};

/// Remove Basket Item Handler
///
/// Removing a product that is not in the basket still succeeds.
#[endpoint(
    tags("basket"),
    summary = "Remove Basket Item",
    parameters(("id" = String, Query, description = "Product key")),
    responses(
        (status_code = 200, description = "Item removed"),
        (status_code = 500, description = "Malformed key"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let pk = parse_key(req.query::<String>("id").as_deref())?;
    let session = depot.session_key_or_500()?;

    depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .baskets
        .remove_item(session, pk)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
