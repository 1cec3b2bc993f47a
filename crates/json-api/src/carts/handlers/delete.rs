//! Clear Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    carts::{caller_cart, errors::into_status_error},
    extensions::*,
    messages::MessageResponse,
    state::State,
};

/// Clear Cart Handler
///
/// Removes every item from the caller's cart. The cart itself is kept.
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::BAD_REQUEST, description = "No user or session"),
    ),
)]
pub(crate) async fn handler(
    session_id: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let session = session_id.into_inner();
    let cart = caller_cart(depot, session.as_deref()).await?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .carts
        .clear_cart(cart.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new("cart cleared")))
}

#[cfg(test)]
mod tests {
    use boutique_app::domain::{carts::records::CartUuid, owners::Owner};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, make_cart};

    use super::*;

    #[tokio::test]
    async fn test_clear_cart_returns_message() -> TestResult {
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
            .expect_clear_cart()
            .once()
            .withf(move |c| *c == cart)
            .return_once(|_| Ok(()));

        let body: MessageResponse = TestClient::delete("http://example.com/cart?session_id=abc")
            .send(&mocks.service(Router::with_path("cart").delete(handler)))
            .await
            .take_json()
            .await?;

        assert_eq!(body.message, "cart cleared");

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_cart_blank_session_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.carts.expect_resolve_cart().never();
        mocks.carts.expect_clear_cart().never();

        let res = TestClient::delete("http://example.com/cart?session_id=%20")
            .send(&mocks.service(Router::with_path("cart").delete(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
