//! Login Handlers

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use salvo::{
    oapi::{ToSchema, extract::FormBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront_app::auth::{AuthServiceError, Credentials};
use tracing::{error, warn};

use crate::{extensions::*, state::State};

/// Login Page Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginPageResponse {
    /// Why the last attempt failed, if it did
    pub error: Option<String>,
}

/// Login Form
///
/// Exactly one of `register` or `login` should be non-empty; it names the
/// button that submitted the form.
#[derive(Deserialize, ToSchema)]
pub(crate) struct LoginForm {
    pub username: String,

    #[serde(default)]
    pub secret: String,

    pub register: Option<String>,

    pub login: Option<String>,
}

impl Debug for LoginForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("register", &self.register)
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}

fn pressed(button: Option<&str>) -> bool {
    button.is_some_and(|value| !value.is_empty())
}

/// Login Page Handler
#[endpoint(tags("auth"), summary = "Login Page")]
pub(crate) async fn get() -> Json<LoginPageResponse> {
    Json(LoginPageResponse { error: None })
}

/// Login Handler
///
/// Registers a new user or logs an existing one in, depending on which
/// button was pressed.
#[endpoint(
    tags("auth"),
    summary = "Register or Log In",
    responses(
        (status_code = 302, description = "Registered (to /login) or logged in (to /)"),
        (status_code = 200, description = "Attempt failed", body = LoginPageResponse),
    ),
)]
#[tracing::instrument(name = "auth.login", skip_all)]
pub(crate) async fn post(
    form: FormBody<LoginForm>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let form = form.into_inner();
    let state = depot.obtain_or_500::<Arc<State>>()?.clone();
    let session = depot.session_key_or_500()?;

    let credentials = Credentials::new(form.username, form.secret);

    let error = if pressed(form.register.as_deref()) {
        match state.app.auth.register(credentials).await {
            Ok(_user) => {
                res.render(Redirect::found("/login"));

                return Ok(());
            }
            Err(error) => Some(describe(&error)),
        }
    } else if pressed(form.login.as_deref()) {
        match state.app.auth.login(session, credentials).await {
            Ok(user) => {
                depot.set_session_user(Some(&user.name))?;
                res.render(Redirect::found("/"));

                return Ok(());
            }
            Err(error) => Some(describe(&error)),
        }
    } else {
        None
    };

    res.render(Json(LoginPageResponse { error }));

    Ok(())
}

fn describe(error: &AuthServiceError) -> String {
    match error {
        AuthServiceError::Sql(source) => error!("login storage failure: {source}"),
        AuthServiceError::Hash(source) => error!("login hashing failure: {source}"),
        AuthServiceError::HashTask(source) => error!("login hashing task failure: {source}"),
        rejected => warn!("login rejected: {rejected}"),
    }

    error.to_string()
}
