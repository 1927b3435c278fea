//! Checkout service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("no user is logged in")]
    Unauthenticated,

    #[error("No such user with Username: {0}")]
    NoSuchUser(String),

    #[error("a checkout for this session is already in progress")]
    CheckoutInProgress,

    #[error("Not enough money in your wallet! Basket total {total}, wallet {wallet}")]
    InsufficientFunds { total: i64, wallet: i64 },

    #[error("Not enough {title} in stock: requested {requested}, in stock {available}")]
    InsufficientStock {
        pk: i64,
        title: String,
        requested: i64,
        available: i64,
    },

    #[error("product {0} no longer exists")]
    ProductNotFound(i64),

    #[error("basket total overflows")]
    TotalOverflow,

    #[error("storage error")]
    Sql(#[from] Error),
}
