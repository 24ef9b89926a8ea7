//! Request-level logging and request IDs.

mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::Instrument as _;
use tracing::{error, info, warn};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Wraps every request in an `http.request` span and logs its outcome.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestLogger {
    slow_request_threshold: Duration,
}

impl RequestLogger {
    pub(crate) const fn new(slow_request_threshold: Duration) -> Self {
        Self {
            slow_request_threshold,
        }
    }
}

#[handler]
impl RequestLogger {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let started = Instant::now();

        let request_id =
            request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

        depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

        request_ids::set_request_id_header(res, &request_id);

        let method = req.method().to_string();
        let path = req.uri().path().to_owned();
        let route = spans::request_route(&path);
        let remote_addr = req.remote_addr().to_string();

        let span = tracing::info_span!(
            parent: None,
            "http.request",
            request_id = %request_id,
            method = %method,
            path = %path,
            route = %route,
            remote_addr = %remote_addr,
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        );

        ctrl.call_next(req, depot, res)
            .instrument(span.clone())
            .await;

        let duration = started.elapsed();
        let status = request_ids::response_status_or_ok(res.status_code);
        let duration_ms = duration.as_millis();
        let threshold_ms = self.slow_request_threshold.as_millis();

        span.record("status", status.as_u16());
        span.record("duration_ms", duration_ms);

        span.in_scope(|| {
            info!(status = status.as_u16(), duration_ms, "request.completed");

            if status.is_server_error() {
                error!(
                    status = status.as_u16(),
                    method = %method,
                    path = %path,
                    request_id = %request_id,
                    "server error response"
                );
            } else if status.is_client_error() {
                warn!(
                    status = status.as_u16(),
                    method = %method,
                    path = %path,
                    request_id = %request_id,
                    "client error response"
                );
            }

            if duration > self.slow_request_threshold {
                warn!(
                    method = %method,
                    path = %path,
                    request_id = %request_id,
                    duration_ms,
                    threshold_ms,
                    "slow request detected"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use salvo::{prelude::*, test::TestClient};

    use super::*;

    #[handler]
    async fn ok() -> &'static str {
        "ok"
    }

    fn service() -> Service {
        Service::new(Router::new().push(Router::with_path("coupons").get(ok)))
            .hoop(RequestLogger::new(Duration::from_secs(1)))
    }

    #[tokio::test]
    async fn propagates_incoming_request_id() {
        let res = TestClient::get("http://example.com/coupons")
            .add_header("x-request-id", "req-42", true)
            .send(&service())
            .await;

        let request_id = res
            .headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok());

        assert_eq!(request_id, Some("req-42"));
    }

    #[tokio::test]
    async fn generates_request_id_when_missing() {
        let res = TestClient::get("http://example.com/coupons")
            .send(&service())
            .await;

        let request_id = res
            .headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .map(uuid::Uuid::parse_str);

        assert!(
            matches!(request_id, Some(Ok(_))),
            "expected a generated uuid, got {request_id:?}"
        );
    }

    #[tokio::test]
    async fn request_id_is_set_on_errors_too() {
        let res = TestClient::get("http://example.com/missing")
            .send(&service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert!(
            res.headers().contains_key("x-request-id"),
            "404 responses should carry a request id"
        );
    }
}
