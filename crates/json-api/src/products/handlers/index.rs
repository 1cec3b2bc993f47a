//! Product Index Handler

use std::{str::FromStr, sync::Arc};

use boutique_app::domain::{
    pagination::{Page, Pagination},
    products::{data::ProductFilter, records::ProductRecord},
};
use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Page size used when the `limit` query parameter is missing or out of range.
pub(crate) const DEFAULT_PAGE_SIZE: i64 = 20;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductPageResponse {
    /// Number of products matching the query across all pages
    pub total: i64,

    pub page: i64,

    pub limit: i64,

    pub products: Vec<ProductResponse>,
}

impl From<Page<ProductRecord>> for ProductPageResponse {
    fn from(page: Page<ProductRecord>) -> Self {
        ProductPageResponse {
            total: page.total,
            page: page.pagination.page,
            limit: page.pagination.limit,
            products: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

pub(crate) fn pagination(page: QueryParam<i64, false>, limit: QueryParam<i64, false>) -> Pagination {
    Pagination::or_default(page.into_inner(), limit.into_inner(), DEFAULT_PAGE_SIZE)
}

fn parse_price(value: QueryParam<String, false>, name: &str) -> Result<Option<Decimal>, StatusError> {
    value
        .into_inner()
        .filter(|value| !value.trim().is_empty())
        .map(|value| Decimal::from_str(value.trim()))
        .transpose()
        .or_400(&format!("invalid {name}"))
}

/// Product Index Handler
///
/// Lists catalog products, optionally filtered by store name, category and
/// price range.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Page of products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid price filter"),
    ),
)]
pub(crate) async fn handler(
    store: QueryParam<String, false>,
    category: QueryParam<String, false>,
    min_price: QueryParam<String, false>,
    max_price: QueryParam<String, false>,
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<ProductPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ProductFilter {
        store_name: store.into_inner().filter(|store| !store.is_empty()),
        store_uuid: None,
        category: category.into_inner().filter(|category| !category.is_empty()),
        min_price: parse_price(min_price, "min_price")?,
        max_price: parse_price(max_price, "max_price")?,
    };

    let products = state
        .app
        .products
        .list_products(filter, pagination(page, limit))
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}
