//! Hoops every page request passes before reaching a handler.

pub(crate) mod liveness;
pub(crate) mod session;
