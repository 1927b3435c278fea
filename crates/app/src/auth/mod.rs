//! Authentication

mod errors;
mod models;
pub mod password;
mod service;

pub use errors::*;
pub use models::*;
pub use service::*;
