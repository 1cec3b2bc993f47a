//! Change Password Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*, messages::MessageResponse, state::State, users::errors::into_status_error,
};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub(crate) struct ChangePasswordRequest {
    pub current_password: String,

    /// At least 8 characters
    pub new_password: String,
}

/// Change Password Handler
#[endpoint(
    tags("users"),
    summary = "Change Password",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Password changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Wrong current password or weak new password"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ChangePasswordRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let ChangePasswordRequest {
        current_password,
        new_password,
    } = json.into_inner();

    state
        .app
        .users
        .change_password(user, &current_password, &new_password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new("password changed successfully")))
}
