//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use storefront_app::sessions::{SessionKey, UserInfo};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Key of the server-side page state, injected by the session hoop.
    fn session_key_or_500(&self) -> Result<SessionKey, StatusError>;

    /// User admitted by the auth gate.
    fn user_or_500(&self) -> Result<&UserInfo, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn session_key_or_500(&self) -> Result<SessionKey, StatusError> {
        self.obtain_or_500::<SessionKey>().copied()
    }

    fn user_or_500(&self) -> Result<&UserInfo, StatusError> {
        self.obtain_or_500::<UserInfo>()
    }
}
