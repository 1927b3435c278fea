//! Request-level logging, request IDs, and route metrics.

mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::{StatusCode, header::HeaderValue},
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, error, info, warn};
use uuid::Uuid;

use super::{metrics, settings};

const REQUEST_ID_HEADER: &str = "x-request-id";
const REQUEST_ID_DEPOT_KEY: &str = "request_id";

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.uri().path() == "/metrics" {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();

    let request_id = resolve_request_id(req.header::<String>(REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

    set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let route = spans::route_label(&path);
    let remote_addr = req.remote_addr().to_string();
    let _in_flight_request = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        request_id = %request_id,
        method = %method,
        route = %route,
        remote_addr = %remote_addr,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let completion = Completion {
        status: res.status_code.unwrap_or(StatusCode::OK),
        duration: started.elapsed(),
        method: &method,
        path: &path,
        request_id: &request_id,
    };

    metrics::observe_request(
        &method,
        &route,
        completion.status.as_u16(),
        completion.duration.as_secs_f64(),
    );

    span.record("status", completion.status.as_u16());
    span.record("duration_ms", completion.duration_ms());

    span.in_scope(|| completion.log(settings::slow_request_threshold_ms()));
}

/// Outcome of one request, logged once the handler chain has finished.
struct Completion<'a> {
    status: StatusCode,
    duration: Duration,
    method: &'a str,
    path: &'a str,
    request_id: &'a str,
}

impl Completion<'_> {
    fn duration_ms(&self) -> u64 {
        u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX)
    }

    fn log(&self, slow_threshold_ms: u64) {
        let status = self.status.as_u16();
        let duration_ms = self.duration_ms();

        info!(status, duration_ms, "request.completed");

        if self.status.is_server_error() {
            error!(
                status,
                method = self.method,
                path = self.path,
                request_id = self.request_id,
                "server error response"
            );
        } else if self.status.is_client_error() {
            warn!(
                status,
                method = self.method,
                path = self.path,
                request_id = self.request_id,
                "client error response"
            );
        }

        if duration_ms > slow_threshold_ms {
            warn!(
                method = self.method,
                path = self.path,
                request_id = self.request_id,
                duration_ms,
                slow_threshold_ms,
                "slow request detected"
            );
        }
    }
}

fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

fn set_request_id_header(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => {
            warn!(
                request_id,
                "could not encode request id for response header: {source}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn ok() -> &'static str {
        "ok"
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(request_logging)
                .push(Router::with_path("ping").get(ok)),
        )
    }

    #[test]
    fn blank_request_ids_are_replaced() {
        let generated = resolve_request_id(Some("   ".to_string()));

        assert!(Uuid::parse_str(&generated).is_ok(), "expected a generated uuid");
        assert_eq!(resolve_request_id(Some("abc".to_string())), "abc");
    }

    #[tokio::test]
    async fn incoming_request_id_is_echoed() -> TestResult {
        let mut res = TestClient::get("http://example.com/ping")
            .add_header(REQUEST_ID_HEADER, "req-123", true)
            .send(&make_service())
            .await;

        assert_eq!(
            res.headers().get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()),
            Some("req-123")
        );
        assert_eq!(res.take_string().await?, "ok");

        Ok(())
    }

    #[tokio::test]
    async fn missing_request_id_is_generated() {
        let res = TestClient::get("http://example.com/ping")
            .send(&make_service())
            .await;

        let header = res
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .unwrap_or_default();

        assert!(Uuid::parse_str(&header).is_ok(), "expected a uuid request id");
    }
}
