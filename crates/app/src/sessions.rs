//! Per-session page state.
//!
//! Every browser session owns one [`SessionState`], addressed by the
//! [`SessionKey`] stored in its cookie. The table is shared between services
//! and guarded by a single mutex that is never held across an `.await`.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    sync::Arc,
};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::baskets::models::Basket;

/// Server-side session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(Uuid);

impl SessionKey {
    /// Allocate a fresh, time-ordered key.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for SessionKey {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SessionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for SessionKey {
    fn from(value: Uuid) -> Self {
        Self::from_uuid(value)
    }
}

/// Logged-in user as shown on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub wallet: i64,
}

/// Everything a session renders: who is logged in and what they picked.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<UserInfo>,
    pub basket: Basket,
    checking_out: bool,
}

/// Concurrency-safe map of session key to page state.
#[derive(Debug, Clone, Default)]
pub struct SessionTable {
    states: Arc<Mutex<FxHashMap<SessionKey, SessionState>>>,
}

// TODO: evict idle session states; entries currently live until process exit.
impl SessionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the session's state; unknown sessions read as empty.
    #[must_use]
    pub fn snapshot(&self, key: SessionKey) -> SessionState {
        self.states.lock().get(&key).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn user(&self, key: SessionKey) -> Option<UserInfo> {
        self.states
            .lock()
            .get(&key)
            .and_then(|state| state.user.clone())
    }

    /// Run `f` against the session's state, creating it if needed.
    pub fn with_state<R>(&self, key: SessionKey, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut states = self.states.lock();

        f(states.entry(key).or_default())
    }

    /// Take the session's basket for checkout, leaving an empty one behind.
    ///
    /// Returns `None` while another checkout holds the same session. Dropping
    /// the claim without [`CheckoutClaim::complete`] puts the items back.
    #[must_use]
    pub fn claim_basket(&self, key: SessionKey) -> Option<CheckoutClaim> {
        self.with_state(key, |state| {
            if state.checking_out {
                return None;
            }

            state.checking_out = true;

            Some(CheckoutClaim {
                table: self.clone(),
                key,
                user: state.user.clone(),
                basket: std::mem::take(&mut state.basket),
                settled: false,
            })
        })
    }
}

/// A basket taken out of its session for the length of one checkout.
#[derive(Debug)]
pub struct CheckoutClaim {
    table: SessionTable,
    key: SessionKey,
    user: Option<UserInfo>,
    basket: Basket,
    settled: bool,
}

impl CheckoutClaim {
    /// Whoever was logged in when the basket was taken.
    #[must_use]
    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    /// Release the session with the claimed items gone and the user's wallet
    /// set to `wallet`. Items added during checkout stay in the basket.
    pub fn complete(mut self, wallet: i64) {
        self.settled = true;

        let name = self.user.as_ref().map(|user| user.name.as_str());

        self.table.with_state(self.key, |state| {
            state.checking_out = false;

            if let Some(current) = state.user.as_mut().filter(|u| Some(u.name.as_str()) == name) {
                current.wallet = wallet;
            }
        });
    }
}

impl Drop for CheckoutClaim {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        let basket = std::mem::take(&mut self.basket);

        self.table.with_state(self.key, |state| {
            state.checking_out = false;

            for (pk, item) in basket.items {
                state.basket.items.entry(pk).or_insert(item);
            }
        });
    }
}
