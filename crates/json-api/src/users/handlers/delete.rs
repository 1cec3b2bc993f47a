//! Delete Account Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*, messages::MessageResponse, state::State, users::errors::into_status_error,
};

/// Delete Account Handler
///
/// Removes the account along with its carts, orders and reset codes.
#[endpoint(
    tags("users"),
    summary = "Delete Account",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Account deleted"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    state
        .app
        .users
        .delete_account(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new("account deleted successfully")))
}
