//! Storefront Domain Concerns

pub mod baskets;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod users;
