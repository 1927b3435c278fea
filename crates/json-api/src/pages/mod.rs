//! Pages

pub(crate) mod index;
