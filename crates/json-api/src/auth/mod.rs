//! Login, logout and the gate in front of every other page.

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod middleware;
