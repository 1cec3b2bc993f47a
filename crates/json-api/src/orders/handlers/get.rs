//! Get Order Handler

use std::sync::Arc;

use boutique_app::domain::orders::{
    data::ShippingDetails,
    records::{OrderItemRecord, OrderRecord},
};
use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub id: Uuid,

    /// Sum of the item subtotals at the prices frozen when ordering
    #[salvo(schema(value_type = f64))]
    pub total_amount: Decimal,

    /// `pending`, `confirmed`, `shipped` or `delivered`
    pub status: String,

    /// `pending`, `completed` or `failed`
    pub payment_status: String,

    pub shipping: ShippingResponse,

    pub items: Vec<OrderItemResponse>,

    /// The date and time the order was placed
    pub created_at: String,

    /// The date and time the order was last updated
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            id: order.uuid.into_uuid(),
            total_amount: order.total_amount,
            status: order.status.to_string(),
            payment_status: order.payment_status.to_string(),
            shipping: order.shipping.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub product_id: Uuid,

    pub product_name: String,

    pub quantity: i32,

    pub size: String,

    /// Unit price when the order was placed
    #[salvo(schema(value_type = f64))]
    pub unit_price: Decimal,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            product_id: item.product_uuid.into_uuid(),
            product_name: item.product_name,
            quantity: item.quantity,
            size: item.size,
            unit_price: item.unit_price,
        }
    }
}

/// Shipping Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingResponse {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub address: String,
    pub address2: String,
    pub postal_code: String,
    pub notes: String,
}

impl From<ShippingDetails> for ShippingResponse {
    fn from(shipping: ShippingDetails) -> Self {
        ShippingResponse {
            name: shipping.name,
            phone: shipping.phone,
            email: shipping.email,
            city: shipping.city,
            address: shipping.address,
            address2: shipping.address2,
            postal_code: shipping.postal_code,
            notes: shipping.notes,
        }
    }
}

/// Get Order Handler
///
/// Returns an order with its items.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
