//! Products

mod errors;
pub(crate) mod index;

pub(crate) use errors::into_status_error;
pub(crate) use index::ProductResponse;
