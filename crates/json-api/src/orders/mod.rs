//! Orders

pub(crate) mod index;

pub(crate) use index::OrderResponse;
