//! Payments service errors.

use thiserror::Error;

use crate::domain::orders::OrdersServiceError;

#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    #[error("order not found")]
    NotFound,

    #[error("failed to load order")]
    Orders(#[source] OrdersServiceError),
}

impl From<OrdersServiceError> for PaymentsServiceError {
    fn from(error: OrdersServiceError) -> Self {
        match error {
            OrdersServiceError::NotFound => Self::NotFound,
            other => Self::Orders(other),
        }
    }
}
