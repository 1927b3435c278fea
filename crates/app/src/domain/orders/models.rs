//! Order Models

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::domain::baskets::models::Basket;

/// A committed checkout. Never updated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub username: String,
    pub date: Date,
    pub basket: Basket,
}

/// New Order Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub username: String,
    pub date: Date,
    pub basket: Basket,
}
