//! Checkout validation.
//!
//! Works on values already read (and locked) inside the checkout transaction,
//! so the decision itself performs no I/O.

use std::collections::BTreeMap;

use crate::domain::{
    baskets::models::Basket, checkout::errors::CheckoutServiceError, products::models::Product,
};

/// Writes a validated basket requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPlan {
    /// Amount to debit from the wallet.
    pub total: i64,

    /// `(product key, quantity)` pairs in key order.
    pub decrements: Vec<(i64, i64)>,
}

/// Validate a basket against the wallet and live stock.
///
/// Funds are checked before stock; the first failing line is reported.
///
/// # Errors
///
/// - [`CheckoutServiceError::TotalOverflow`] if the total does not fit.
/// - [`CheckoutServiceError::InsufficientFunds`] if the total exceeds `wallet`.
/// - [`CheckoutServiceError::ProductNotFound`] if a line has no stock row.
/// - [`CheckoutServiceError::InsufficientStock`] if a line wants more than is left.
pub fn plan_checkout(
    basket: &Basket,
    wallet: i64,
    stock: &BTreeMap<i64, Product>,
) -> Result<CheckoutPlan, CheckoutServiceError> {
    let mut basket = basket.clone();

    let total = basket
        .recompute_total()
        .map_err(|_| CheckoutServiceError::TotalOverflow)?;

    if total > wallet {
        return Err(CheckoutServiceError::InsufficientFunds { total, wallet });
    }

    let mut decrements = Vec::with_capacity(basket.len());

    for (pk, item) in &basket.items {
        let product = stock
            .get(pk)
            .ok_or(CheckoutServiceError::ProductNotFound(*pk))?;

        if item.quantity > product.quantity {
            return Err(CheckoutServiceError::InsufficientStock {
                pk: *pk,
                title: product.title.clone(),
                requested: item.quantity,
                available: product.quantity,
            });
        }

        decrements.push((*pk, item.quantity));
    }

    Ok(CheckoutPlan { total, decrements })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn product(pk: i64, price: i64, quantity: i64) -> Product {
        Product {
            pk,
            title: format!("Product {pk}"),
            kind: "thing".to_string(),
            price,
            quantity,
        }
    }

    fn basket(lines: &[(Product, i64)]) -> TestResult<Basket> {
        let mut basket = Basket::default();

        for (product, quantity) in lines {
            basket.add_item(product.clone())?;
            basket.set_quantity(product.pk, Some(*quantity))?;
        }

        Ok(basket)
    }

    fn stock(products: &[Product]) -> BTreeMap<i64, Product> {
        products.iter().map(|p| (p.pk, p.clone())).collect()
    }

    #[test]
    fn plan_debits_total_and_decrements_each_line() -> TestResult {
        let a = product(1, 10, 5);
        let basket = basket(&[(a.clone(), 2)])?;

        let plan = plan_checkout(&basket, 100, &stock(&[a]))?;

        assert_eq!(plan.total, 20);
        assert_eq!(plan.decrements, vec![(1, 2)]);

        Ok(())
    }

    #[test]
    fn total_equal_to_wallet_is_accepted() -> TestResult {
        let a = product(1, 25, 5);
        let basket = basket(&[(a.clone(), 4)])?;

        let plan = plan_checkout(&basket, 100, &stock(&[a]))?;

        assert_eq!(plan.total, 100);

        Ok(())
    }

    #[test]
    fn total_above_wallet_is_rejected() -> TestResult {
        let a = product(1, 60, 5);
        let basket = basket(&[(a.clone(), 2)])?;

        let result = plan_checkout(&basket, 100, &stock(&[a]));

        assert!(matches!(
            result,
            Err(CheckoutServiceError::InsufficientFunds {
                total: 120,
                wallet: 100
            })
        ));

        Ok(())
    }

    #[test]
    fn funds_are_checked_before_stock() -> TestResult {
        let a = product(1, 60, 0);
        let basket = basket(&[(a.clone(), 2)])?;

        let result = plan_checkout(&basket, 100, &stock(&[a]));

        assert!(matches!(
            result,
            Err(CheckoutServiceError::InsufficientFunds { .. })
        ));

        Ok(())
    }

    #[test]
    fn quantity_above_live_stock_is_rejected() -> TestResult {
        let a = product(1, 1, 10);
        let b = product(2, 1, 1);
        let basket = basket(&[(a.clone(), 2), (b.clone(), 3)])?;

        let result = plan_checkout(&basket, 100, &stock(&[a, b]));

        match result {
            Err(CheckoutServiceError::InsufficientStock {
                pk,
                title,
                requested,
                available,
            }) => {
                assert_eq!(pk, 2);
                assert_eq!(title, "Product 2");
                assert_eq!(requested, 3);
                assert_eq!(available, 1);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        Ok(())
    }

    #[test]
    fn stock_is_read_from_the_live_rows_not_the_snapshot() -> TestResult {
        let snapshot = product(1, 10, 50);
        let basket = basket(&[(snapshot, 3)])?;
        let live = product(1, 10, 2);

        let result = plan_checkout(&basket, 100, &stock(&[live]));

        assert!(matches!(
            result,
            Err(CheckoutServiceError::InsufficientStock { available: 2, .. })
        ));

        Ok(())
    }

    #[test]
    fn missing_stock_row_is_reported() -> TestResult {
        let basket = basket(&[(product(9, 1, 1), 1)])?;

        let result = plan_checkout(&basket, 100, &BTreeMap::new());

        assert!(matches!(
            result,
            Err(CheckoutServiceError::ProductNotFound(9))
        ));

        Ok(())
    }

    #[test]
    fn empty_basket_plans_no_writes() -> TestResult {
        let plan = plan_checkout(&Basket::default(), 0, &BTreeMap::new())?;

        assert_eq!(plan.total, 0);
        assert!(plan.decrements.is_empty());

        Ok(())
    }

    #[test]
    fn overflowing_total_is_rejected() -> TestResult {
        let a = product(1, i64::MAX, 5);
        let basket = basket(&[(a.clone(), 2)])?;

        let result = plan_checkout(&basket, i64::MAX, &stock(&[a]));

        assert!(matches!(result, Err(CheckoutServiceError::TotalOverflow)));

        Ok(())
    }
}
