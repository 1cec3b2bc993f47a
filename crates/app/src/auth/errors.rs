//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::{passwords::PasswordError, tokens::TokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("email or phone is required")]
    MissingIdentifier,

    #[error("invalid first name or last name")]
    InvalidName,

    #[error("password must be at least 8 characters")]
    WeakPassword,

    #[error("invalid email format")]
    InvalidEmail,

    #[error("invalid phone format")]
    InvalidPhone,

    #[error("email already registered")]
    EmailTaken,

    #[error("phone already registered")]
    PhoneTaken,

    #[error("account already exists")]
    AlreadyExists,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid token")]
    InvalidToken(#[source] TokenError),

    #[error("user not found")]
    NotFound,

    #[error("invalid reset code")]
    InvalidResetCode,

    #[error("reset code expired")]
    ResetCodeExpired,

    #[error("reset code already used")]
    ResetCodeUsed,

    #[error("could not generate a reset code, please try again")]
    ResetCodeExhausted,

    #[error("invalid data")]
    InvalidData,

    #[error("password hashing failed")]
    Password(#[from] PasswordError),

    #[error("token signing failed")]
    Signing(#[source] TokenError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation) => Self::NotFound,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<TokenError> for AuthServiceError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Signing(_) => Self::Signing(error),
            TokenError::Expired | TokenError::Invalid(_) => Self::InvalidToken(error),
        }
    }
}
