//! User Errors

use salvo::http::StatusError;
use tracing::error;

use boutique_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::NotFound => StatusError::not_found().brief("user not found"),
        UsersServiceError::InvalidFirstName
        | UsersServiceError::InvalidLastName
        | UsersServiceError::InvalidPhone
        | UsersServiceError::PhoneInUse
        | UsersServiceError::IncorrectPassword
        | UsersServiceError::WeakPassword
        | UsersServiceError::InvalidReference
        | UsersServiceError::InvalidData => StatusError::bad_request().brief(error.to_string()),
        UsersServiceError::Password(source) => {
            error!("failed to hash password: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Sql(source) => {
            error!("users storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
