//! Auth Handlers

use boutique_app::auth::{AuthServiceError, records::AuthSession};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use crate::users::get::UserResponse;

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod refresh;
pub(crate) mod register;
pub(crate) mod request_password_reset;
pub(crate) mod verify_reset_code;

/// A signed-in user and their token pair.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AuthResponse {
    pub user: UserResponse,

    /// Bearer token for authenticated requests
    pub access_token: String,

    /// Token exchanged at `/api/auth/refresh-token` for a new access token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        AuthResponse {
            user: session.user.into(),
            access_token: session.tokens.access_token,
            refresh_token: session.tokens.refresh_token,
            expires_in: session.tokens.expires_in,
        }
    }
}

/// The email address when given, otherwise the phone number.
pub(crate) fn resolve_identifier(
    email: Option<String>,
    phone: Option<String>,
) -> Result<String, AuthServiceError> {
    [email, phone]
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_owned())
        .find(|value| !value.is_empty())
        .ok_or(AuthServiceError::MissingIdentifier)
}
