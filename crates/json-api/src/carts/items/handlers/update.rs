//! Update Cart Item Handler

use std::sync::Arc;

use boutique_app::domain::carts::data::CartItemUpdate;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{
        caller_cart,
        errors::into_status_error,
        items::{CartItemChangedResponse, CartItemResponse},
    },
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// The new quantity, not an increment
    pub quantity: i32,

    /// Left unchanged when missing or blank
    #[serde(default)]
    pub size: Option<String>,
}

/// Update Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity or insufficient stock"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not in the cart"),
    ),
)]
pub(crate) async fn handler(
    item_id: PathParam<Uuid>,
    session_id: QueryParam<String, false>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartItemChangedResponse>, StatusError> {
    let session = session_id.into_inner();
    let cart = caller_cart(depot, session.as_deref()).await?;
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let item = state
        .app
        .carts
        .update_item(
            cart.uuid,
            item_id.into_inner().into(),
            CartItemUpdate {
                quantity: request.quantity,
                size: request.size,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartItemChangedResponse {
        message: "cart item updated".to_string(),
        item: CartItemResponse::from(item),
    }))
}
