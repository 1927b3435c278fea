//! Product Models

use serde::{Deserialize, Serialize};

/// Product Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub pk: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: i64,
    pub quantity: i64,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub title: String,
    pub kind: String,
    pub price: i64,
    pub quantity: i64,
}

/// Column the catalog may be ordered by.
///
/// Anything outside this set falls back to [`SortColumn::Key`], so raw
/// request input never reaches the `ORDER BY` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Key,
    Title,
    Type,
    Quantity,
    Price,
}

impl SortColumn {
    /// Resolve a request parameter against the allow-list.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("title") => Self::Title,
            Some("type") => Self::Type,
            Some("quantity") => Self::Quantity,
            Some("price") => Self::Price,
            _ => Self::Key,
        }
    }

    /// Parameter spelling, empty for the default order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Key => "",
            Self::Title => "title",
            Self::Type => "type",
            Self::Quantity => "quantity",
            Self::Price => "price",
        }
    }

    pub(crate) const fn order_by_sql(self) -> &'static str {
        match self {
            Self::Key => "pk",
            Self::Title => "title, pk",
            Self::Type => "type, pk",
            Self::Quantity => "quantity, pk",
            Self::Price => "price, pk",
        }
    }
}
