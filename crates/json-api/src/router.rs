//! App Router

use salvo::Router;

use crate::{auth, carts, orders, products, users};

/// Every `/api` route.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::register::handler))
                .push(Router::with_path("login").post(auth::login::handler))
                .push(Router::with_path("refresh-token").post(auth::refresh::handler))
                .push(Router::with_path("logout").post(auth::logout::handler))
                .push(
                    Router::with_path("request-password-reset")
                        .post(auth::request_password_reset::handler),
                )
                .push(
                    Router::with_path("verify-reset-code").post(auth::verify_reset_code::handler),
                ),
        )
        .push(
            Router::with_path("users")
                .hoop(auth::middleware::required)
                .push(
                    Router::with_path("profile")
                        .get(users::get::handler)
                        .put(users::update::handler)
                        .delete(users::delete::handler),
                )
                .push(Router::with_path("change-password").put(users::change_password::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("store/{store_id}").get(products::store::handler))
                .push(Router::with_path("category/{category}").get(products::category::handler))
                .push(Router::with_path("images/{**path}").get(products::image::handler))
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::with_path("cart")
                .hoop(auth::middleware::optional)
                .get(carts::get::handler)
                .delete(carts::delete::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::items::create::handler)
                        .push(
                            Router::with_path("{item_id}")
                                .put(carts::items::update::handler)
                                .delete(carts::items::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("orders")
                .hoop(auth::middleware::optional)
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(orders::get::handler)
                        .push(Router::with_path("payment").post(orders::payment::handler))
                        .push(
                            Router::with_path("confirmation").get(orders::confirmation::handler),
                        ),
                ),
        )
}
