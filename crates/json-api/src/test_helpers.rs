//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use storefront_app::{
    auth::MockAuthService,
    context::AppContext,
    database::MockLiveness,
    domain::{
        baskets::MockBasketsService,
        checkout::MockCheckoutService,
        orders::MockOrdersService,
        products::{MockProductsService, models::Product},
    },
    sessions::{SessionKey, UserInfo},
};
use uuid::Uuid;

use crate::state::State;

pub(crate) const TEST_SESSION_KEY: SessionKey = SessionKey::from_uuid(Uuid::nil());

pub(crate) const TEST_USERNAME: &str = "alice";

pub(crate) fn test_user() -> UserInfo {
    UserInfo {
        name: TEST_USERNAME.to_string(),
        wallet: 100,
    }
}

pub(crate) fn make_product(pk: i64, title: &str, price: i64) -> Product {
    Product {
        pk,
        title: title.to_string(),
        kind: "drink".to_string(),
        price,
        quantity: 5,
    }
}

/// Stand in for the session hoop and the auth gate.
#[salvo::handler]
pub(crate) async fn inject_session(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.inject(TEST_SESSION_KEY);
    depot.inject(test_user());

    ctrl.call_next(req, depot, res).await;
}

/// Application context built from mocks. Services left unset have no
/// expectations, so any call to them fails the test.
#[derive(Debug, Default)]
pub(crate) struct MockApp {
    liveness: MockLiveness,
    products: MockProductsService,
    baskets: MockBasketsService,
    checkout: MockCheckoutService,
    auth: MockAuthService,
    orders: MockOrdersService,
}

impl MockApp {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn liveness(mut self, liveness: MockLiveness) -> Self {
        self.liveness = liveness;
        self
    }

    pub(crate) fn products(mut self, products: MockProductsService) -> Self {
        self.products = products;
        self
    }

    pub(crate) fn baskets(mut self, baskets: MockBasketsService) -> Self {
        self.baskets = baskets;
        self
    }

    pub(crate) fn checkout(mut self, checkout: MockCheckoutService) -> Self {
        self.checkout = checkout;
        self
    }

    pub(crate) fn auth(mut self, auth: MockAuthService) -> Self {
        self.auth = auth;
        self
    }

    pub(crate) fn orders(mut self, orders: MockOrdersService) -> Self {
        self.orders = orders;
        self
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            liveness: Arc::new(self.liveness),
            products: Arc::new(self.products),
            baskets: Arc::new(self.baskets),
            checkout: Arc::new(self.checkout),
            auth: Arc::new(self.auth),
            orders: Arc::new(self.orders),
        })
    }

    /// Serve `route` as a logged-in session.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_session)
                .push(route),
        )
    }
}
