//! Logout Handler
//!
//! Tokens are not tracked server side, so logging out only acknowledges the
//! request. Clients discard their tokens.

use salvo::prelude::*;

use crate::messages::MessageResponse;

#[endpoint(
    tags("auth"),
    summary = "Logout",
    responses((status_code = StatusCode::OK, description = "Logged out")),
)]
pub(crate) async fn handler() -> Json<MessageResponse> {
    Json(MessageResponse::new("logged out successfully"))
}
