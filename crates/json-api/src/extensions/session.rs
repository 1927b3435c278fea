//! Cookie session accessors.
//!
//! The signed cookie carries three keys: `Session` addresses the server-side
//! page state, `User` names whoever logged in, and `OrderBy` remembers the
//! catalog sort.

use salvo::{
    prelude::{Depot, StatusError},
    session::{Session, SessionDepotExt},
};
use storefront_app::{domain::products::models::SortColumn, sessions::SessionKey};

use crate::extensions::*;

const SESSION_KEY: &str = "Session";
const USER_KEY: &str = "User";
const ORDER_BY_KEY: &str = "OrderBy";

pub(crate) trait SessionExt {
    fn cookie_session_key(&self) -> Option<SessionKey>;

    fn set_cookie_session_key(&mut self, key: SessionKey) -> Result<(), StatusError>;

    fn session_user(&self) -> Option<String>;

    /// `None` clears the stored username.
    fn set_session_user(&mut self, username: Option<&str>) -> Result<(), StatusError>;

    fn session_order_by(&self) -> SortColumn;

    fn set_session_order_by(&mut self, sort: SortColumn) -> Result<(), StatusError>;
}

impl SessionExt for Depot {
    fn cookie_session_key(&self) -> Option<SessionKey> {
        self.session()?.get::<SessionKey>(SESSION_KEY)
    }

    fn set_cookie_session_key(&mut self, key: SessionKey) -> Result<(), StatusError> {
        update_session(self, |session| session.insert(SESSION_KEY, key))
    }

    fn session_user(&self) -> Option<String> {
        self.session()?.get::<String>(USER_KEY)
    }

    fn set_session_user(&mut self, username: Option<&str>) -> Result<(), StatusError> {
        update_session(self, |session| match username {
            Some(username) => session.insert(USER_KEY, username),
            None => {
                session.remove(USER_KEY);

                Ok(())
            }
        })
    }

    fn session_order_by(&self) -> SortColumn {
        let param = self
            .session()
            .and_then(|session| session.get::<String>(ORDER_BY_KEY));

        SortColumn::from_param(param.as_deref())
    }

    fn set_session_order_by(&mut self, sort: SortColumn) -> Result<(), StatusError> {
        update_session(self, |session| session.insert(ORDER_BY_KEY, sort.as_str()))
    }
}

fn update_session(
    depot: &mut Depot,
    update: impl FnOnce(&mut Session) -> Result<(), serde_json::Error>,
) -> Result<(), StatusError> {
    let mut session = depot.take_session().unwrap_or_else(Session::new);

    let result = update(&mut session);

    depot.set_session(session);

    result.or_500("failed to write cookie session")
}
