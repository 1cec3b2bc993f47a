//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{
        errors::into_status_error,
        handlers::{AuthResponse, resolve_identifier},
    },
    extensions::*,
    state::State,
};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub(crate) struct LoginRequest {
    /// Email address; a phone number is accepted here too
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    pub password: String,
}

/// Login Handler
///
/// Signs in with an email address or phone number.
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<AuthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let LoginRequest {
        email,
        phone,
        password,
    } = json.into_inner();

    let identifier = resolve_identifier(email, phone).map_err(into_status_error)?;

    let session = state
        .app
        .auth
        .login(&identifier, &password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(session.into()))
}
