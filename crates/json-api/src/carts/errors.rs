//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use boutique_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound
        | CartsServiceError::ProductNotFound
        | CartsServiceError::ItemNotFound => StatusError::not_found().brief(error.to_string()),
        CartsServiceError::AlreadyExists
        | CartsServiceError::InsufficientStock
        | CartsServiceError::InvalidQuantity
        | CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => StatusError::bad_request().brief(error.to_string()),
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
