//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use boutique_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::MissingIdentifier
        | AuthServiceError::InvalidName
        | AuthServiceError::WeakPassword
        | AuthServiceError::InvalidEmail
        | AuthServiceError::InvalidPhone
        | AuthServiceError::EmailTaken
        | AuthServiceError::PhoneTaken
        | AuthServiceError::AlreadyExists
        | AuthServiceError::InvalidResetCode
        | AuthServiceError::ResetCodeExpired
        | AuthServiceError::ResetCodeUsed
        | AuthServiceError::ResetCodeExhausted
        | AuthServiceError::InvalidData => StatusError::bad_request().brief(error.to_string()),
        AuthServiceError::InvalidCredentials | AuthServiceError::InvalidToken(_) => {
            StatusError::unauthorized().brief(error.to_string())
        }
        AuthServiceError::NotFound => StatusError::not_found().brief("user not found"),
        AuthServiceError::Password(source) => {
            error!("failed to hash password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Signing(source) => {
            error!("failed to sign token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use boutique_app::auth::TokenError;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn validation_errors_keep_their_message() {
        let status = into_status_error(AuthServiceError::EmailTaken);

        assert_eq!(status.code, StatusCode::BAD_REQUEST);
        assert_eq!(status.brief, "email already registered");
    }

    #[test]
    fn credential_errors_are_unauthorized() {
        assert_eq!(
            into_status_error(AuthServiceError::InvalidCredentials).code,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            into_status_error(AuthServiceError::InvalidToken(TokenError::Expired)).code,
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn storage_errors_hide_details() {
        let status = into_status_error(AuthServiceError::Sql(sqlx::Error::PoolTimedOut));

        assert_eq!(status.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!status.brief.contains("pool"), "storage details must not leak");
    }
}
