//! Baskets service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BasketsServiceError {
    #[error("product {0} is already in the basket")]
    AlreadyInBasket(i64),

    #[error("product {0} is not in the basket")]
    NotInBasket(i64),

    #[error("product not found")]
    NotFound,

    #[error("basket total overflows")]
    TotalOverflow,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for BasketsServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            error => Self::Sql(error),
        }
    }
}
