//! Request Password Reset Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{errors::into_status_error, handlers::resolve_identifier},
    extensions::*,
    state::State,
};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub(crate) struct PasswordResetRequest {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub(crate) struct PasswordResetResponse {
    pub message: String,

    /// When the reset code stops being accepted
    pub expires_at: String,
}

/// Request Password Reset Handler
///
/// Issues a six-digit reset code and emails it to the account holder.
#[endpoint(
    tags("auth"),
    summary = "Request Password Reset",
    responses(
        (status_code = StatusCode::OK, description = "Reset code issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Email or phone missing"),
        (status_code = StatusCode::NOT_FOUND, description = "No such account"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<PasswordResetRequest>,
    depot: &mut Depot,
) -> Result<Json<PasswordResetResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let PasswordResetRequest { email, phone } = json.into_inner();
    let identifier = resolve_identifier(email, phone).map_err(into_status_error)?;

    let expires_at = state
        .app
        .auth
        .request_password_reset(&identifier)
        .await
        .map_err(into_status_error)?;

    Ok(Json(PasswordResetResponse {
        message: "reset code sent to your email".to_string(),
        expires_at: expires_at.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use boutique_app::auth::AuthServiceError;
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("auth/request-password-reset").post(handler))
    }

    #[tokio::test]
    async fn test_request_reset_returns_expiry() -> TestResult {
        let mut mocks = Mocks::default();
        let expires_at: Timestamp = "2026-03-01T13:00:00Z".parse()?;

        mocks
            .auth
            .expect_request_password_reset()
            .once()
            .withf(|identifier| identifier == "ana@example.com")
            .return_once(move |_| Ok(expires_at));

        let body: PasswordResetResponse =
            TestClient::post("http://example.com/auth/request-password-reset")
                .json(&json!({ "email": " ana@example.com " }))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(body.message, "reset code sent to your email");
        assert_eq!(body.expires_at, expires_at.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_request_reset_falls_back_to_phone() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_request_password_reset()
            .once()
            .withf(|identifier| identifier == "+573001234567")
            .return_once(|_| Ok(Timestamp::UNIX_EPOCH));

        let res = TestClient::post("http://example.com/auth/request-password-reset")
            .json(&json!({ "email": "", "phone": "+573001234567" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_request_reset_without_identifier_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.auth.expect_request_password_reset().never();

        let res = TestClient::post("http://example.com/auth/request-password-reset")
            .json(&json!({}))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_request_reset_unknown_account_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_request_password_reset()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::post("http://example.com/auth/request-password-reset")
            .json(&json!({ "email": "nobody@example.com" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
