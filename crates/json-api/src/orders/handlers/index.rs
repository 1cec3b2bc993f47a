//! Order Index Handler

use std::sync::Arc;

use boutique_app::domain::{
    orders::records::OrderRecord,
    pagination::{Page, Pagination},
};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderPageResponse {
    pub total: i64,

    pub page: i64,

    pub limit: i64,

    /// Newest first
    pub orders: Vec<OrderResponse>,
}

impl From<Page<OrderRecord>> for OrderPageResponse {
    fn from(page: Page<OrderRecord>) -> Self {
        OrderPageResponse {
            total: page.total,
            page: page.pagination.page,
            limit: page.pagination.limit,
            orders: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Order Index Handler
///
/// Lists the caller's orders.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Page of orders"),
        (status_code = StatusCode::BAD_REQUEST, description = "No user or session"),
    ),
)]
pub(crate) async fn handler(
    session_id: QueryParam<String, false>,
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<OrderPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = session_id.into_inner();
    let owner = depot.owner_or_400(session.as_deref())?;

    let pagination = Pagination::clamped(page.into_inner(), limit.into_inner(), DEFAULT_PAGE_SIZE);

    let orders = state
        .app
        .orders
        .list_orders(owner, pagination)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}
