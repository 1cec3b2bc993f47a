//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::owners::MissingOwner;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart item already exists")]
    AlreadyExists,

    #[error("cart not found")]
    NotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("cart item not found")]
    ItemNotFound,

    #[error("insufficient stock")]
    InsufficientStock,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("user_id or session_id required")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<MissingOwner> for CartsServiceError {
    fn from(_: MissingOwner) -> Self {
        Self::InvalidReference
    }
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
