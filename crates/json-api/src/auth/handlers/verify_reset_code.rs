//! Verify Reset Code Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{errors::into_status_error, handlers::resolve_identifier},
    extensions::*,
    messages::MessageResponse,
    state::State,
};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub(crate) struct VerifyResetCodeRequest {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    /// The six-digit code from the reset email
    pub reset_code: String,

    pub new_password: String,
}

/// Verify Reset Code Handler
///
/// Consumes a reset code and sets a new password.
#[endpoint(
    tags("auth"),
    summary = "Verify Reset Code",
    responses(
        (status_code = StatusCode::OK, description = "Password updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid, expired or used code"),
        (status_code = StatusCode::NOT_FOUND, description = "No such account"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<VerifyResetCodeRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let VerifyResetCodeRequest {
        email,
        phone,
        reset_code,
        new_password,
    } = json.into_inner();

    let identifier = resolve_identifier(email, phone).map_err(into_status_error)?;

    state
        .app
        .auth
        .verify_reset_code(&identifier, &reset_code, &new_password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new("password updated successfully")))
}

#[cfg(test)]
mod tests {
    use boutique_app::auth::AuthServiceError;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("auth/verify-reset-code").post(handler))
    }

    #[tokio::test]
    async fn test_verify_reset_code_updates_password() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_verify_reset_code()
            .once()
            .withf(|identifier, code, password| {
                identifier == "ana@example.com" && code == "042917" && password == "n3wpassword"
            })
            .return_once(|_, _, _| Ok(()));

        let body: MessageResponse = TestClient::post("http://example.com/auth/verify-reset-code")
            .json(&json!({
                "email": "ana@example.com",
                "reset_code": "042917",
                "new_password": "n3wpassword",
            }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(body.message, "password updated successfully");

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_expired_code_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_verify_reset_code()
            .once()
            .return_once(|_, _, _| Err(AuthServiceError::ResetCodeExpired));

        let res = TestClient::post("http://example.com/auth/verify-reset-code")
            .json(&json!({
                "phone": "+573001234567",
                "reset_code": "042917",
                "new_password": "n3wpassword",
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
