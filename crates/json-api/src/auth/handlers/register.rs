//! Register Handler

use std::sync::Arc;

use boutique_app::auth::data::NewUser;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{errors::into_status_error, handlers::AuthResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub(crate) struct RegisterRequest {
    /// Email address; either this or `phone` is required
    #[serde(default)]
    pub email: Option<String>,

    /// Phone number; either this or `email` is required
    #[serde(default)]
    pub phone: Option<String>,

    pub first_name: String,

    pub last_name: String,

    /// At least 8 characters
    pub password: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        NewUser {
            email: request.email,
            phone: request.phone,
            first_name: request.first_name,
            last_name: request.last_name,
            password: request.password,
        }
    }
}

/// Register Handler
///
/// Creates an account and signs it in.
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid or duplicate account details"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AuthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .auth
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(session.into()))
}

#[cfg(test)]
mod tests {
    use boutique_app::{auth::AuthServiceError, domain::users::records::UserUuid};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, make_session};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("auth/register").post(handler))
    }

    #[tokio::test]
    async fn test_register_returns_201_with_tokens() -> TestResult {
        let mut mocks = Mocks::default();
        let uuid = UserUuid::new();

        mocks
            .auth
            .expect_register()
            .once()
            .withf(|user| {
                user.email.as_deref() == Some("ana@example.com")
                    && user.phone.is_none()
                    && user.first_name == "Ana"
                    && user.password == "s3cretpass"
            })
            .return_once(move |_| Ok(make_session(uuid)));

        let mut res = TestClient::post("http://example.com/auth/register")
            .json(&json!({
                "email": "ana@example.com",
                "first_name": "Ana",
                "last_name": "Gómez",
                "password": "s3cretpass",
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: AuthResponse = res.take_json().await?;

        assert_eq!(body.user.id, uuid.into_uuid());
        assert_eq!(body.access_token, "access");
        assert_eq!(body.refresh_token, "refresh");
        assert_eq!(body.expires_in, 86_400);

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_email_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_register()
            .once()
            .return_once(|_| Err(AuthServiceError::EmailTaken));

        let res = TestClient::post("http://example.com/auth/register")
            .json(&json!({
                "email": "ana@example.com",
                "first_name": "Ana",
                "last_name": "Gómez",
                "password": "s3cretpass",
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_malformed_body_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.auth.expect_register().never();

        let res = TestClient::post("http://example.com/auth/register")
            .json(&json!({ "email": "ana@example.com" }))
            .send(&make_service(mocks))
            .await;

        assert!(res.status_code.is_some_and(|code| code.is_client_error()));

        Ok(())
    }
}
