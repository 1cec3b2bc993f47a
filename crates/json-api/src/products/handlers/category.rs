//! Category Products Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        index::{ProductPageResponse, pagination},
    },
    state::State,
};

/// Category Products Handler
///
/// Lists the products in one category.
#[endpoint(
    tags("products"),
    summary = "List Category Products",
    responses((status_code = StatusCode::OK, description = "Page of products")),
)]
pub(crate) async fn handler(
    category: PathParam<String>,
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<ProductPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_category_products(category.into_inner(), pagination(page, limit))
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}
