//! Basket

pub(crate) mod add;
pub(crate) mod checkout;
mod errors;
mod models;
pub(crate) mod quantity;
pub(crate) mod remove;

use salvo::http::StatusError;

pub(crate) use errors::into_status_error;
pub(crate) use models::{BasketItemResponse, BasketResponse};

/// Parse a product key taken from the path or query string.
///
/// Malformed keys are answered with a 500 carrying the parse error.
pub(crate) fn parse_key(raw: Option<&str>) -> Result<i64, StatusError> {
    let raw = raw.unwrap_or_default();

    raw.parse::<i64>().map_err(|source| {
        StatusError::internal_server_error().brief(format!("invalid product key {raw:?}: {source}"))
    })
}
