//! Storefront application domain, persistence, and session state.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod sessions;

#[cfg(test)]
mod test;
