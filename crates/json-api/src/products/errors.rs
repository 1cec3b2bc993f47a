//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use boutique_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("product not found"),
        ProductsServiceError::AlreadyExists
        | ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => StatusError::bad_request().brief(error.to_string()),
        ProductsServiceError::Sql(source) => {
            error!("failed to query products: {source}");

            StatusError::internal_server_error()
        }
    }
}
