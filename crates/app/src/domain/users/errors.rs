//! Users service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::passwords::PasswordError;

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("user not found")]
    NotFound,

    #[error("invalid first name")]
    InvalidFirstName,

    #[error("invalid last name")]
    InvalidLastName,

    #[error("invalid phone format")]
    InvalidPhone,

    #[error("phone already in use")]
    PhoneInUse,

    #[error("current password is incorrect")]
    IncorrectPassword,

    #[error("new password must be at least 8 characters long")]
    WeakPassword,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("password hashing failed")]
    Password(#[from] PasswordError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::PhoneInUse,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
