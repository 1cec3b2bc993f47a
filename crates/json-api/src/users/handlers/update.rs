//! Update Profile Handler

use std::sync::Arc;

use boutique_app::domain::users::data::ProfileUpdate;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, get::UserResponse},
};

/// Blank or missing fields are left unchanged.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub(crate) struct UpdateProfileRequest {
    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
        }
    }
}

/// Update Profile Handler
#[endpoint(
    tags("users"),
    summary = "Update Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated profile"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid profile details"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let profile = state
        .app
        .users
        .update_profile(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use boutique_app::domain::users::UsersServiceError;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_user};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.user_service(Router::with_path("users/profile").put(handler))
    }

    #[tokio::test]
    async fn test_update_profile_forwards_supplied_fields() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_update_profile()
            .once()
            .withf(|user, update| {
                *user == TEST_USER_UUID
                    && *update
                        == ProfileUpdate {
                            first_name: Some("Ana María".to_string()),
                            last_name: None,
                            phone: None,
                        }
            })
            .return_once(|user, _| {
                let mut record = make_user(user);
                record.first_name = "Ana María".to_string();

                Ok(record)
            });

        let body: UserResponse = TestClient::put("http://example.com/users/profile")
            .json(&json!({ "first_name": "Ana María" }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(body.first_name, "Ana María");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_profile_phone_in_use_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_update_profile()
            .once()
            .return_once(|_, _| Err(UsersServiceError::PhoneInUse));

        let res = TestClient::put("http://example.com/users/profile")
            .json(&json!({ "phone": "+573001234567" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
