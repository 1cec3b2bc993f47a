//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    carts::{caller_cart, errors::into_status_error},
    extensions::*,
    messages::MessageResponse,
    state::State,
};

/// Remove Cart Item Handler
///
/// Removing an item that is not in the cart still succeeds.
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::BAD_REQUEST, description = "No user or session"),
    ),
)]
pub(crate) async fn handler(
    item_id: PathParam<Uuid>,
    session_id: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let session = session_id.into_inner();
    let cart = caller_cart(depot, session.as_deref()).await?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .carts
        .remove_item(cart.uuid, item_id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new("item removed from cart")))
}
