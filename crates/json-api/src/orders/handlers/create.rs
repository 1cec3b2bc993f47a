//! Create Order Handler

use std::sync::Arc;

use boutique_app::domain::orders::data::ShippingDetails;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts, extensions::*, orders::errors::into_status_error, orders::get::OrderResponse,
    state::State,
};

/// Create Order Request
///
/// Every shipping field is optional. A confirmation email is sent when
/// `email` is given.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CreateOrderRequest {
    /// Anonymous session; ignored when a bearer token is sent
    pub session_id: Option<String>,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub address: String,
    pub address2: String,
    pub postal_code: String,
    pub notes: String,
}

impl From<CreateOrderRequest> for ShippingDetails {
    fn from(request: CreateOrderRequest) -> Self {
        ShippingDetails {
            name: request.name,
            phone: request.phone,
            email: request.email,
            city: request.city,
            address: request.address,
            address2: request.address2,
            postal_code: request.postal_code,
            notes: request.notes,
        }
    }
}

/// Create Order Handler
///
/// Turns the caller's cart into an order. Stock is reserved and the cart is
/// emptied in the same step.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or insufficient stock"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let request = json.into_inner();
    let cart = carts::caller_cart(depot, request.session_id.as_deref()).await?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .create_from_cart(cart.uuid, cart.owner, request.into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use boutique_app::domain::{
        carts::records::CartUuid,
        orders::{OrdersServiceError, records::OrderUuid},
        owners::Owner,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_cart, make_order};

    use super::*;

    fn route() -> Router {
        Router::with_path("orders").post(handler)
    }

    #[tokio::test]
    async fn test_create_order_from_session_cart() -> TestResult {
        let cart = CartUuid::new();
        let order = OrderUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_resolve_cart()
            .once()
            .withf(|owner| *owner == Owner::Session("abc".to_string()))
            .return_once(move |owner| Ok(make_cart(cart, owner)));

        mocks
            .orders
            .expect_create_from_cart()
            .once()
            .withf(move |c, owner, shipping| {
                *c == cart
                    && *owner == Owner::Session("abc".to_string())
                    && shipping.email == "ana@example.com"
                    && shipping.city == "Bogotá"
            })
            .return_once(move |_, _, _| Ok(make_order(order)));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "session_id": "abc",
                "email": "ana@example.com",
                "city": "Bogotá",
            }))
            .send(&mocks.service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.id, order.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_as_user() -> TestResult {
        let cart = CartUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_resolve_cart()
            .once()
            .withf(|owner| *owner == Owner::User(TEST_USER_UUID))
            .return_once(move |owner| Ok(make_cart(cart, owner)));

        mocks
            .orders
            .expect_create_from_cart()
            .once()
            .withf(|_, owner, shipping| {
                *owner == Owner::User(TEST_USER_UUID) && *shipping == ShippingDetails::default()
            })
            .return_once(|_, _, _| Ok(make_order(OrderUuid::new())));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({}))
            .send(&mocks.user_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_empty_cart_returns_400() -> TestResult {
        let cart = CartUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_resolve_cart()
            .once()
            .return_once(move |owner| Ok(make_cart(cart, owner)));

        mocks
            .orders
            .expect_create_from_cart()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::EmptyCart));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "session_id": "abc" }))
            .send(&mocks.service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_without_identity_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.carts.expect_resolve_cart().never();
        mocks.orders.expect_create_from_cart().never();

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({ "email": "ana@example.com" }))
            .send(&mocks.service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
