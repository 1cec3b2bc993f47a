//! Prometheus metrics collection and exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const DURATION_BUCKETS: [f64; 12] = [
    0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    payments_total: IntCounterVec,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

fn metrics() -> Option<&'static Metrics> {
    METRICS
        .get_or_init(|| {
            build_metrics()
                .inspect_err(|source| error!("failed to build metrics registry: {source}"))
                .ok()
        })
        .as_ref()
}

fn build_metrics() -> Result<Metrics, prometheus::Error> {
    let registry = Registry::new();

    let requests_total = IntCounterVec::new(
        Opts::new(
            "boutique_json_http_requests_total",
            "HTTP requests by method, route, status class and status code.",
        ),
        &["method", "route", "status_class", "status_code"],
    )?;

    let request_duration_seconds = HistogramVec::new(
        HistogramOpts::new(
            "boutique_json_http_request_duration_seconds",
            "HTTP request duration in seconds by method and route.",
        )
        .buckets(DURATION_BUCKETS.to_vec()),
        &["method", "route"],
    )?;

    let requests_in_flight = IntGauge::with_opts(Opts::new(
        "boutique_json_http_requests_in_flight",
        "HTTP requests currently being served.",
    ))?;

    let payments_total = IntCounterVec::new(
        Opts::new(
            "boutique_json_payments_total",
            "Payment attempts by resulting payment status.",
        ),
        &["payment_status"],
    )?;

    registry.register(Box::new(requests_total.clone()))?;
    registry.register(Box::new(request_duration_seconds.clone()))?;
    registry.register(Box::new(requests_in_flight.clone()))?;
    registry.register(Box::new(payments_total.clone()))?;

    Ok(Metrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        payments_total,
    })
}

/// Keeps the in-flight gauge raised for as long as it lives.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard(Option<&'static Metrics>);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let metrics = metrics();

        if let Some(metrics) = metrics {
            metrics.requests_in_flight.inc();
        }

        Self(metrics)
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(metrics) = self.0 {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code_label = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[
            method,
            route,
            status_class(status_code),
            status_code_label.as_str(),
        ])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a finished payment attempt under its resulting status.
pub(crate) fn record_payment(payment_status: &str) {
    if let Some(metrics) = metrics() {
        metrics
            .payments_total
            .with_label_values(&[payment_status])
            .inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(res: &mut Response, _req: &mut Request) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    if let Ok(content_type) = HeaderValue::from_str(encoder.format_type()) {
        res.headers_mut().insert(CONTENT_TYPE, content_type);
    }

    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

fn status_class(status_code: u16) -> &'static str {
    match status_code / 100 {
        1 => "1xx",
        2 => "2xx",
        3 => "3xx",
        4 => "4xx",
        5 => "5xx",
        _ => "other",
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

    #[tokio::test]
    async fn metrics_endpoint_exposes_request_and_payment_metrics() -> TestResult {
        observe_request("GET", "/api/products", 200, 0.042);
        observe_request("POST", "/api/orders/{uuid}/payment", 400, 0.123);
        record_payment("failed");

        let service =
            Service::new(Router::new().push(Router::with_path("metrics").get(metrics_handler)));

        let body = TestClient::get("http://example.com/metrics")
            .send(&service)
            .await
            .take_string()
            .await?;

        assert!(
            body.contains(r#"route="/api/orders/{uuid}/payment""#),
            "expected normalised route label"
        );
        assert!(
            body.contains("boutique_json_http_request_duration_seconds"),
            "expected request duration histogram"
        );
        assert!(
            body.contains("boutique_json_http_requests_in_flight"),
            "expected in-flight gauge"
        );
        assert!(
            body.contains(r#"boutique_json_payments_total{payment_status="failed"}"#),
            "expected payment counter"
        );

        Ok(())
    }

    #[test]
    fn status_codes_are_grouped_by_class() {
        assert_eq!(status_class(201), "2xx");
        assert_eq!(status_class(404), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(42), "other");
    }
}
