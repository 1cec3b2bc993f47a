//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use boutique_app::domain::{orders::OrdersServiceError, payments::PaymentsServiceError};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("order not found"),
        OrdersServiceError::EmptyCart
        | OrdersServiceError::InsufficientStock
        | OrdersServiceError::InvalidReference
        | OrdersServiceError::AlreadyExists
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => StatusError::bad_request().brief(error.to_string()),
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn payment_status_error(error: PaymentsServiceError) -> StatusError {
    match error {
        PaymentsServiceError::NotFound => StatusError::not_found().brief("order not found"),
        PaymentsServiceError::Orders(source) => into_status_error(source),
    }
}
