//! Extension traits

mod depot;
mod result;
mod session;

pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
pub(crate) use session::SessionExt as _;
