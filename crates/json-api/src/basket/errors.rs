//! Errors

use salvo::http::StatusError;
use storefront_app::domain::baskets::BasketsServiceError;
use tracing::{error, warn};

pub(crate) fn into_status_error(error: BasketsServiceError) -> StatusError {
    match error {
        BasketsServiceError::AlreadyInBasket(_) => {
            warn!("{error}");

            StatusError::method_not_allowed().brief(error.to_string())
        }
        BasketsServiceError::NotInBasket(_) | BasketsServiceError::NotFound => {
            warn!("{error}");

            StatusError::not_found().brief(error.to_string())
        }
        BasketsServiceError::TotalOverflow => {
            StatusError::internal_server_error().brief(error.to_string())
        }
        BasketsServiceError::Sql(source) => {
            error!("failed to update basket: {source}");

            StatusError::internal_server_error()
        }
    }
}
