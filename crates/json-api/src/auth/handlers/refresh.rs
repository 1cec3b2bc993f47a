//! Refresh Token Handler

use std::sync::Arc;

use boutique_app::auth::records::RefreshedToken;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{auth::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub(crate) struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub(crate) struct RefreshResponse {
    pub access_token: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl From<RefreshedToken> for RefreshResponse {
    fn from(token: RefreshedToken) -> Self {
        RefreshResponse {
            access_token: token.access_token,
            expires_in: token.expires_in,
        }
    }
}

/// Refresh Token Handler
///
/// Exchanges a refresh token for a new access token.
#[endpoint(
    tags("auth"),
    summary = "Refresh Access Token",
    responses(
        (status_code = StatusCode::OK, description = "New access token"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid or expired refresh token"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RefreshRequest>,
    depot: &mut Depot,
) -> Result<Json<RefreshResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let token = state
        .app
        .auth
        .refresh(&json.into_inner().refresh_token)
        .await
        .map_err(into_status_error)?;

    Ok(Json(token.into()))
}

#[cfg(test)]
mod tests {
    use boutique_app::auth::{AuthServiceError, TokenError};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("auth/refresh-token").post(handler))
    }

    #[tokio::test]
    async fn test_refresh_returns_new_access_token() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_refresh()
            .once()
            .withf(|token| token == "refresh")
            .return_once(|_| {
                Ok(RefreshedToken {
                    access_token: "fresh".to_string(),
                    expires_in: 3_600,
                })
            });

        let body: RefreshResponse = TestClient::post("http://example.com/auth/refresh-token")
            .json(&json!({ "refresh_token": "refresh" }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(body.access_token, "fresh");
        assert_eq!(body.expires_in, 3_600);

        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_with_access_token_returns_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_refresh()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidToken(TokenError::Invalid(
                jsonwebtoken::errors::ErrorKind::InvalidToken.into(),
            ))));

        let res = TestClient::post("http://example.com/auth/refresh-token")
            .json(&json!({ "refresh_token": "access" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
