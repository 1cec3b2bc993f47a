//! Request-level logging, request IDs, and parent trace extraction.

mod parent_context;
mod request_ids;
mod spans;

use std::time::Instant;

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Health and metrics endpoints scraped often enough to drown out real traffic.
const UNLOGGED_PATHS: [&str; 2] = ["/metrics", "/health"];

/// What gets reported once a request finishes.
#[derive(Debug)]
struct RequestLog {
    request_id: String,
    method: String,
    path: String,
    route: String,
    started: Instant,
}

impl RequestLog {
    fn span(&self, req: &Request, span_name: &str) -> Span {
        tracing::info_span!(
            parent: None,
            "http.request",
            otel.name = %span_name,
            otel.kind = "server",
            request_id = %self.request_id,
            method = %self.method,
            path = %self.path,
            remote_addr = %req.remote_addr(),
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        )
    }

    fn finish(self, span: &Span, status: StatusCode) {
        let elapsed = self.started.elapsed();
        let duration_ms = elapsed.as_millis();
        let threshold_ms = u128::from(settings::slow_request_threshold_ms());
        let code = status.as_u16();

        metrics::observe_request(&self.method, &self.route, code, elapsed.as_secs_f64());

        span.record("status", code);
        span.record("duration_ms", duration_ms);

        let _entered = span.enter();

        info!(status = code, duration_ms, "request.completed");

        if status.is_server_error() {
            error!(status = code, request_id = %self.request_id, "server error response");
        } else if status.is_client_error() {
            warn!(status = code, request_id = %self.request_id, "client error response");
        }

        if duration_ms > threshold_ms {
            warn!(
                request_id = %self.request_id,
                duration_ms,
                threshold_ms,
                "slow request detected"
            );
        }
    }
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNLOGGED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let names = spans::request_span_name(&method, &path);

    let log = RequestLog {
        request_id,
        method,
        path,
        route: names.otel_path,
        started: Instant::now(),
    };

    let span = log.span(req, &names.otel_span_name);

    if settings::otel_parent_propagation_enabled()
        && let Some(parent_context) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent_context)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    {
        let _in_flight = metrics::InFlightRequestGuard::track();

        ctrl.call_next(req, depot, res)
            .instrument(span.clone())
            .await;
    }

    log.finish(&span, res.status_code.unwrap_or(StatusCode::OK));
}
