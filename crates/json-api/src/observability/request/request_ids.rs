//! Request ID resolution and echoing.

use salvo::{http::header::HeaderValue, prelude::Response};
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Reuse the caller's request id when it is short printable ASCII, otherwise
/// mint a fresh UUIDv7.
pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .map(|value| value.trim().to_owned())
        .filter(|value| is_acceptable(value))
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    // Resolved ids are printable ASCII, so this only fails on a bug upstream.
    if let Ok(value) = HeaderValue::from_str(request_id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_id_is_kept_when_printable() {
        assert_eq!(resolve_request_id(Some(" req-123 ".to_owned())), "req-123");
    }

    #[test]
    fn unusable_ids_are_replaced() {
        for value in [String::new(), "two words".to_owned(), "x".repeat(200)] {
            let resolved = resolve_request_id(Some(value.clone()));

            assert!(
                Uuid::parse_str(&resolved).is_ok(),
                "expected {value:?} to be replaced, got {resolved}"
            );
        }
    }
}
