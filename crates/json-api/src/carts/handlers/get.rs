//! Get Cart Handler

use std::sync::Arc;

use boutique_app::domain::carts::records::CartLine;
use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{caller_cart, errors::into_status_error},
    extensions::*,
    products::images::image_url,
    state::State,
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub id: Uuid,

    /// Number of distinct lines in the cart
    pub total_items: i64,

    /// Sum of quantity times current unit price
    #[salvo(schema(value_type = f64))]
    pub total_price: Decimal,

    /// The items in the cart
    pub items: Vec<CartLineResponse>,
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// The unique identifier of the cart item
    pub id: Uuid,

    pub product_id: Uuid,

    pub product_name: String,

    pub quantity: i32,

    pub size: String,

    /// Current unit price of the product
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    pub image_url: String,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.uuid.into_uuid(),
            product_id: line.product_uuid.into_uuid(),
            image_url: image_url(&line.image_path),
            product_name: line.product_name,
            quantity: line.quantity,
            size: line.size,
            price: line.price,
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's cart, creating an empty one on first use.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart contents"),
        (status_code = StatusCode::BAD_REQUEST, description = "No user or session"),
    ),
)]
pub(crate) async fn handler(
    session_id: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let session = session_id.into_inner();
    let cart = caller_cart(depot, session.as_deref()).await?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let lines = state
        .app
        .carts
        .cart_lines(cart.uuid)
        .await
        .map_err(into_status_error)?;

    let total_price = state
        .app
        .carts
        .cart_total(cart.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse {
        id: cart.uuid.into_uuid(),
        total_items: i64::try_from(lines.len()).unwrap_or(i64::MAX),
        total_price,
        items: lines.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use boutique_app::domain::{
        carts::records::{CartItemUuid, CartUuid},
        owners::Owner,
        products::records::ProductUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_cart};

    use super::*;

    fn route() -> Router {
        Router::with_path("cart").get(handler)
    }

    fn make_line(quantity: i32) -> CartLine {
        CartLine {
            uuid: CartItemUuid::new(),
            product_uuid: ProductUuid::new(),
            product_name: "Linen Dress".to_string(),
            price: Decimal::new(120_000, 0),
            image_path: "../assets/images/celeste/linen.jpg".to_string(),
            quantity,
            size: "M".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_cart_for_session() -> TestResult {
        let cart = CartUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_resolve_cart()
            .once()
            .withf(|owner| *owner == Owner::Session("abc".to_string()))
            .return_once(move |owner| Ok(make_cart(cart, owner)));

        mocks
            .carts
            .expect_cart_lines()
            .once()
            .withf(move |c| *c == cart)
            .return_once(|_| Ok(vec![make_line(2), make_line(1)]));

        mocks
            .carts
            .expect_cart_total()
            .once()
            .withf(move |c| *c == cart)
            .return_once(|_| Ok(Decimal::new(360_000, 0)));

        let body: CartResponse = TestClient::get("http://example.com/cart?session_id=abc")
            .send(&mocks.service(route()))
            .await
            .take_json()
            .await?;

        assert_eq!(body.id, cart.into_uuid());
        assert_eq!(body.total_items, 2, "total_items counts lines, not units");
        assert_eq!(body.total_price, Decimal::new(360_000, 0));
        assert_eq!(
            body.items.first().map(|line| line.image_url.as_str()),
            Some("/api/products/images/celeste/linen.jpg")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_prefers_user_over_session() -> TestResult {
        let cart = CartUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_resolve_cart()
            .once()
            .withf(|owner| *owner == Owner::User(TEST_USER_UUID))
            .return_once(move |owner| Ok(make_cart(cart, owner)));

        mocks.carts.expect_cart_lines().once().return_once(|_| Ok(vec![]));
        mocks
            .carts
            .expect_cart_total()
            .once()
            .return_once(|_| Ok(Decimal::ZERO));

        let body: CartResponse = TestClient::get("http://example.com/cart?session_id=abc")
            .send(&mocks.user_service(route()))
            .await
            .take_json()
            .await?;

        assert_eq!(body.total_items, 0);
        assert!(body.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_without_identity_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.carts.expect_resolve_cart().never();

        let res = TestClient::get("http://example.com/cart")
            .send(&mocks.service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
