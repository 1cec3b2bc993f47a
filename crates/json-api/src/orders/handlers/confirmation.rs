//! Order Confirmation Handler

use std::sync::Arc;

use boutique_app::domain::orders::records::{OrderItemRecord, OrderRecord};
use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, orders::errors::into_status_error, state::State};

const THANK_YOU: &str = "Thank you for your purchase!";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ConfirmationResponse {
    pub order_id: Uuid,

    /// When the order was placed
    pub order_date: String,

    #[salvo(schema(value_type = f64))]
    pub total_amount: Decimal,

    pub items: Vec<ConfirmationItemResponse>,

    pub status: String,

    pub payment_status: String,

    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ConfirmationItemResponse {
    pub product_name: String,

    pub quantity: i32,

    pub size: String,

    #[salvo(schema(value_type = f64))]
    pub unit_price: Decimal,
}

impl From<OrderItemRecord> for ConfirmationItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        ConfirmationItemResponse {
            product_name: item.product_name,
            quantity: item.quantity,
            size: item.size,
            unit_price: item.unit_price,
        }
    }
}

impl From<OrderRecord> for ConfirmationResponse {
    fn from(order: OrderRecord) -> Self {
        ConfirmationResponse {
            order_id: order.uuid.into_uuid(),
            order_date: order.created_at.to_string(),
            total_amount: order.total_amount,
            items: order.items.into_iter().map(Into::into).collect(),
            status: order.status.to_string(),
            payment_status: order.payment_status.to_string(),
            message: THANK_YOU.to_string(),
        }
    }
}

/// Order Confirmation Handler
///
/// A receipt-style summary of the order.
#[endpoint(
    tags("orders"),
    summary = "Order Confirmation",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order summary"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ConfirmationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use boutique_app::domain::orders::records::OrderUuid;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, make_order};

    use super::*;

    #[tokio::test]
    async fn test_confirmation_thanks_the_customer() -> TestResult {
        let order = OrderUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_get_order()
            .once()
            .withf(move |o| *o == order)
            .return_once(move |_| Ok(make_order(order)));

        let service =
            mocks.service(Router::with_path("orders/{id}/confirmation").get(handler));

        let body: ConfirmationResponse =
            TestClient::get(format!("http://example.com/orders/{order}/confirmation"))
                .send(&service)
                .await
                .take_json()
                .await?;

        assert_eq!(body.order_id, order.into_uuid());
        assert_eq!(body.message, "Thank you for your purchase!");
        assert_eq!(body.items.len(), 1, "expected one item");
        assert_eq!(body.items[0].product_name, "Linen Dress");

        Ok(())
    }
}
