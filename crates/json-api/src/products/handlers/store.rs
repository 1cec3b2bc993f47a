//! Store Products Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        index::{ProductPageResponse, pagination},
    },
    state::State,
};

/// Store Products Handler
///
/// Lists the products sold by one store.
#[endpoint(
    tags("products"),
    summary = "List Store Products",
    responses((status_code = StatusCode::OK, description = "Page of products")),
)]
pub(crate) async fn handler(
    store_id: PathParam<Uuid>,
    page: QueryParam<i64, false>,
    limit: QueryParam<i64, false>,
    depot: &mut Depot,
) -> Result<Json<ProductPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_store_products(store_id.into_inner().into(), pagination(page, limit))
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}

#[cfg(test)]
mod tests {
    use boutique_app::domain::{
        pagination::{Page, Pagination},
        products::records::{ProductUuid, StoreUuid},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, make_product};

    use super::*;

    #[tokio::test]
    async fn test_store_products_are_scoped_to_store() -> TestResult {
        let store = StoreUuid::new();
        let product = ProductUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_list_store_products()
            .once()
            .withf(move |s, pagination| *s == store && *pagination == Pagination { page: 3, limit: 20 })
            .return_once(move |_, pagination| {
                Ok(Page {
                    items: vec![make_product(product)],
                    total: 41,
                    pagination,
                })
            });

        let service =
            mocks.service(Router::with_path("products/store/{store_id}").get(handler));

        let body: ProductPageResponse =
            TestClient::get(format!("http://example.com/products/store/{store}?page=3"))
                .send(&service)
                .await
                .take_json()
                .await?;

        assert_eq!(body.total, 41);
        assert_eq!(body.page, 3);
        assert_eq!(body.products.len(), 1, "expected one product");

        Ok(())
    }
}
