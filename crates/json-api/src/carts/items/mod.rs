//! Cart Items

use boutique_app::domain::carts::records::CartItemRecord;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod handlers;

pub(crate) use handlers::*;

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub id: Uuid,

    pub product_id: Uuid,

    pub quantity: i32,

    pub size: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            id: item.uuid.into_uuid(),
            product_id: item.product_uuid.into_uuid(),
            quantity: item.quantity,
            size: item.size,
        }
    }
}

/// A cart item together with what happened to it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemChangedResponse {
    pub message: String,

    pub item: CartItemResponse,
}
