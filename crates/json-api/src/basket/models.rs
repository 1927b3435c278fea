//! Basket Responses

use std::collections::BTreeMap;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use storefront_app::domain::baskets::models::{Basket, BasketItem};

/// A basket line: the product as it was when added, plus the wanted quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct BasketItemResponse {
    pub pk: i64,

    pub title: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub price: i64,

    /// Requested quantity
    pub quantity: i64,
}

impl From<BasketItem> for BasketItemResponse {
    fn from(item: BasketItem) -> Self {
        BasketItemResponse {
            pk: item.pk,
            title: item.title,
            kind: item.kind,
            price: item.price,
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct BasketResponse {
    /// Lines keyed by product key
    pub items: BTreeMap<i64, BasketItemResponse>,

    /// Sum of quantity times price over every line
    pub total: i64,
}

impl From<Basket> for BasketResponse {
    fn from(basket: Basket) -> Self {
        BasketResponse {
            items: basket
                .items
                .into_iter()
                .map(|(pk, item)| (pk, item.into()))
                .collect(),
            total: basket.total,
        }
    }
}
