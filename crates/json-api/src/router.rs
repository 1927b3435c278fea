//! App Router

use salvo::{
    Router,
    session::{CookieStore, SessionHandler},
};

use crate::{auth, basket, gates, orders, pages, products};

/// Every browser-facing route, behind the session, liveness and auth gates.
pub(crate) fn app_router(sessions: SessionHandler<CookieStore>) -> Router {
    Router::new()
        .hoop(sessions)
        .hoop(gates::session::handler)
        .hoop(gates::liveness::handler)
        .hoop(auth::middleware::handler)
        .get(pages::index::handler)
        .push(
            Router::with_path("login")
                .get(auth::login::get)
                .post(auth::login::post),
        )
        .push(Router::with_path("logout").goal(auth::logout::handler))
        .push(Router::with_path("products").get(products::index::handler))
        .push(Router::with_path("orders").get(orders::index::handler))
        .push(
            Router::with_path("basket")
                .delete(basket::remove::handler)
                .post(basket::quantity::handler)
                .push(Router::with_path("checkout").post(basket::checkout::handler))
                .push(Router::with_path("{pk}").put(basket::add::handler)),
        )
}
