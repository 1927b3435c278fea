//! Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    /// Process status; `ok` whenever the server answers
    pub status: String,

    /// `up` when the database answered a ping, `down` otherwise
    pub database: String,
}

/// Healthcheck handler
///
/// Mounted outside the session and liveness gates so probes never need a
/// cookie and never fail on a database outage.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let database = match state.app.liveness.ping().await {
        Ok(()) => "up",
        Err(source) => {
            warn!("healthcheck database ping failed: {source}");

            "down"
        }
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        database: database.to_string(),
    }))
}
