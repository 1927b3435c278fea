//! Auth middleware.

use std::sync::Arc;

use salvo::prelude::*;
use storefront_app::{auth::AuthServiceError, sessions::UserInfo};
use tracing::{debug, error};

use crate::{extensions::*, state::State};

pub(crate) const LOGIN_PATH: &str = "/login";

/// Admit the request only when the cookie's username is the user bound to
/// this session and still exists; everyone else is sent to the login page.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.uri().path() == LOGIN_PATH {
        ctrl.call_next(req, depot, res).await;

        return;
    }

    let Some(user) = authenticate(depot).await else {
        res.render(Redirect::temporary(LOGIN_PATH));
        ctrl.skip_rest();

        return;
    };

    depot.inject(user);

    ctrl.call_next(req, depot, res).await;
}

async fn authenticate(depot: &Depot) -> Option<UserInfo> {
    let state = depot.obtain::<Arc<State>>().ok()?;
    let session = depot.session_key_or_500().ok()?;
    let username = depot.session_user()?;

    match state.app.auth.verify_session(session, &username).await {
        Ok(user) => Some(user),
        Err(AuthServiceError::Sql(source)) => {
            error!("failed to verify session user: {source}");

            None
        }
        Err(reason) => {
            debug!(username = %username, "session rejected: {reason}");

            None
        }
    }
}
