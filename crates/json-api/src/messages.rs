//! Message and Error Responses

use salvo::{
    http::ResBody,
    oapi::ToSchema,
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// A bare acknowledgement.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of every 4xx/5xx response that does not carry its own.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    pub error: String,
}

/// Catcher hoop rendering [`StatusError`]s and bodiless error statuses as
/// `{"error": "..."}`. Responses that already have a body pass through.
#[handler]
pub(crate) async fn error_body(res: &mut Response, ctrl: &mut FlowCtrl) {
    let Some(status) = res
        .status_code
        .filter(|status| status.is_client_error() || status.is_server_error())
    else {
        return;
    };

    let error = match &res.body {
        ResBody::Error(error) if !error.brief.is_empty() => error.brief.clone(),
        ResBody::None | ResBody::Error(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_lowercase(),
        _ => return,
    };

    res.body = ResBody::None;
    res.render(Json(ErrorResponse { error }));

    ctrl.skip_rest();
}

#[cfg(test)]
mod tests {
    use salvo::{
        catcher::Catcher,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn out_of_stock() -> Result<Json<MessageResponse>, StatusError> {
        Err(StatusError::bad_request().brief("insufficient stock"))
    }

    #[handler]
    async fn declined(res: &mut Response) -> Json<MessageResponse> {
        res.status_code(StatusCode::BAD_REQUEST);

        Json(MessageResponse::new("payment declined"))
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .push(Router::with_path("stock").get(out_of_stock))
                .push(Router::with_path("declined").get(declined)),
        )
        .catcher(Catcher::default().hoop(error_body))
    }

    #[tokio::test]
    async fn status_errors_render_their_brief() -> TestResult {
        let mut res = TestClient::get("http://example.com/stock")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(body.error, "insufficient stock");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_routes_get_an_error_body() -> TestResult {
        let mut res = TestClient::get("http://example.com/nowhere")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(body.error, "not found");

        Ok(())
    }

    #[tokio::test]
    async fn error_statuses_with_a_body_pass_through() -> TestResult {
        let mut res = TestClient::get("http://example.com/declined")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(body.message, "payment declined");

        Ok(())
    }
}
