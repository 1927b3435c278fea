//! Storage liveness gate.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::error;

use crate::{extensions::*, state::State};

/// Refuse the request with a 500 when the database does not answer.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Err(error) = ping(depot).await {
        res.render(error);
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

async fn ping(depot: &Depot) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state.app.liveness.ping().await.map_err(|source| {
        error!("database liveness check failed: {source}");

        StatusError::internal_server_error().brief(format!("Storage is unavailable: {source}"))
    })
}
