//! Add Cart Item Handler

use std::sync::Arc;

use boutique_app::domain::carts::data::NewCartItem;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
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

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product_id: Uuid,

    /// At least 1
    pub quantity: i32,

    #[serde(default)]
    pub size: String,

    /// Anonymous session; ignored when a bearer token is sent
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Add Cart Item Handler
///
/// Adds a product to the caller's cart. Adding the same product and size
/// again increases the quantity of the existing line.
#[endpoint(
    tags("cart"),
    summary = "Add Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity or insufficient stock"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemChangedResponse>, StatusError> {
    let request = json.into_inner();
    let cart = caller_cart(depot, request.session_id.as_deref()).await?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let item = state
        .app
        .carts
        .add_item(
            cart.uuid,
            NewCartItem {
                product_uuid: request.product_id.into(),
                quantity: request.quantity,
                size: request.size,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(CartItemChangedResponse {
        message: "item added to cart".to_string(),
        item: CartItemResponse::from(item),
    }))
}
