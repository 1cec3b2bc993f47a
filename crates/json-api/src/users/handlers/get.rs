//! Get Profile Handler

use std::sync::Arc;

use boutique_app::domain::users::records::UserRecord;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, state::State, users::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub id: Uuid,

    pub email: Option<String>,

    pub phone: Option<String>,

    pub first_name: String,

    pub last_name: String,

    /// The date and time the account was created
    pub created_at: String,

    /// The date and time the profile was last changed
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            id: user.uuid.into_uuid(),
            email: user.email,
            phone: user.phone,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// Get Profile Handler
///
/// Returns the signed-in user's profile.
#[endpoint(
    tags("users"),
    summary = "Get Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let profile = state
        .app
        .users
        .get_profile(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}
