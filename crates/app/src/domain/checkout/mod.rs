//! Checkout

pub mod errors;
pub mod plan;
pub mod service;

pub use errors::CheckoutServiceError;
pub use service::*;
