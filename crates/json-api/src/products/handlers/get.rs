//! Get Product Handler

use std::sync::Arc;

use boutique_app::domain::products::records::ProductRecord;
use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{errors::into_status_error, images::image_url},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: Uuid,

    pub store_id: Uuid,

    pub store_name: String,

    pub name: String,

    pub description: String,

    pub category: String,

    /// Unit price in the shop currency
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    pub available_units: i32,

    /// Where the product image is served from
    pub image_url: String,

    pub sizes: Vec<String>,

    /// The date and time the product was created
    pub created_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.uuid.into_uuid(),
            store_id: product.store_uuid.into_uuid(),
            store_name: product.store_name,
            name: product.name,
            description: product.description,
            category: product.category,
            price: product.price,
            available_units: product.available_units,
            image_url: image_url(&product.image_path),
            sizes: product.sizes,
            created_at: product.created_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
