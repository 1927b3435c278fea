//! Basket Models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{baskets::errors::BasketsServiceError, products::models::Product};

/// A product snapshot taken when it was added, with the requested quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    pub pk: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: i64,
    pub quantity: i64,
}

impl From<Product> for BasketItem {
    fn from(product: Product) -> Self {
        Self {
            pk: product.pk,
            title: product.title,
            kind: product.kind,
            price: product.price,
            quantity: 1,
        }
    }
}

impl BasketItem {
    /// Price of the whole line, `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<i64> {
        self.quantity.checked_mul(self.price)
    }
}

/// Basket Model
///
/// Items are keyed by product key; `total` is only trustworthy straight after
/// [`Basket::recompute_total`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    pub items: BTreeMap<i64, BasketItem>,
    pub total: i64,
}

impl Basket {
    #[must_use]
    pub fn contains(&self, pk: i64) -> bool {
        self.items.contains_key(&pk)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Insert a product with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`BasketsServiceError::AlreadyInBasket`] without touching the
    /// existing line when the product is present.
    pub fn add_item(&mut self, product: Product) -> Result<BasketItem, BasketsServiceError> {
        if self.contains(product.pk) {
            return Err(BasketsServiceError::AlreadyInBasket(product.pk));
        }

        let item = BasketItem::from(product);

        self.items.insert(item.pk, item.clone());

        Ok(item)
    }

    pub fn remove_item(&mut self, pk: i64) -> Option<BasketItem> {
        self.items.remove(&pk)
    }

    /// Set a line's quantity; missing or non-positive requests become 1.
    ///
    /// # Errors
    ///
    /// Returns [`BasketsServiceError::NotInBasket`] for an unknown key.
    pub fn set_quantity(
        &mut self,
        pk: i64,
        quantity: Option<i64>,
    ) -> Result<BasketItem, BasketsServiceError> {
        let item = self
            .items
            .get_mut(&pk)
            .ok_or(BasketsServiceError::NotInBasket(pk))?;

        item.quantity = quantity.filter(|q| *q >= 1).unwrap_or(1);

        Ok(item.clone())
    }

    /// Recalculate `total` as the sum of quantity times price.
    ///
    /// # Errors
    ///
    /// Returns [`BasketsServiceError::TotalOverflow`] if the sum does not fit.
    pub fn recompute_total(&mut self) -> Result<i64, BasketsServiceError> {
        let total = self
            .items
            .values()
            .try_fold(0_i64, |acc, item| item.line_total()?.checked_add(acc))
            .ok_or(BasketsServiceError::TotalOverflow)?;

        self.total = total;

        Ok(total)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.total = 0;
    }
}
