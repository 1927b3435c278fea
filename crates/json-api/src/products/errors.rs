//! Errors

use salvo::http::StatusError;
use storefront_app::domain::products::ProductsServiceError;
use tracing::error;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Sql(source) => {
            error!("failed to read products: {source}");

            StatusError::internal_server_error()
        }
        other => StatusError::internal_server_error().brief(other.to_string()),
    }
}
