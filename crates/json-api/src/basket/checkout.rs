//! Checkout Handler

use std::sync::Arc;

use salvo::prelude::*;
use storefront_app::domain::checkout::CheckoutServiceError;
use tracing::{error, warn};

use crate::{
    extensions::*,
    observability::{CheckoutOutcome, record_checkout},
    orders::OrderResponse,
    state::State,
};

/// Checkout Handler
///
/// Turns the session's basket into an order, debiting the wallet and stock in
/// one transaction. Refusals carry the reason in the response body.
#[endpoint(
    tags("basket"),
    summary = "Checkout",
    responses(
        (status_code = 200, description = "Order placed", body = OrderResponse),
        (status_code = 500, description = "Checkout refused or failed"),
    ),
)]
#[tracing::instrument(name = "basket.checkout", skip_all, err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrderResponse>, StatusError> {
    let session = depot.session_key_or_500()?;

    let order = depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .checkout
        .checkout(session)
        .await
        .map_err(into_status_error)?;

    record_checkout(CheckoutOutcome::Committed);

    Ok(Json(order.into()))
}

fn into_status_error(error: CheckoutServiceError) -> StatusError {
    if let CheckoutServiceError::Sql(source) = error {
        error!("checkout failed: {source}");
        record_checkout(CheckoutOutcome::Failed);

        return StatusError::internal_server_error();
    }

    warn!("checkout rejected: {error}");
    record_checkout(CheckoutOutcome::Rejected);

    StatusError::internal_server_error().brief(error.to_string())
}
