//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{auth::middleware::LOGIN_PATH, extensions::*, state::State};

/// Logout Handler
///
/// Forgets the session's user and sends the browser to the login page.
#[endpoint(
    tags("auth"),
    summary = "Log Out",
    responses((status_code = 302, description = "Logged out")),
)]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let session = depot.session_key_or_500()?;

    depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .auth
        .logout(session)
        .await
        .or_500("failed to log out")?;

    depot.set_session_user(None)?;

    res.render(Redirect::found(LOGIN_PATH));

    Ok(())
}
