//! Users

pub mod models;
pub(crate) mod repository;
