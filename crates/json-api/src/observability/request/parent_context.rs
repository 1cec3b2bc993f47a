//! W3C trace context extraction from incoming headers.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

/// Returns the caller's trace context, or `None` when the request carries no
/// valid `traceparent`.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    let context = global::get_text_map_propagator(|propagator| {
        propagator.extract_with_context(&Context::new(), &RequestHeaders(headers))
    });

    context
        .span()
        .span_context()
        .is_valid()
        .then_some(context)
}

struct RequestHeaders<'a>(&'a HeaderMap);

impl Extractor for RequestHeaders<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
