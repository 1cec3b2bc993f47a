//! Products Data

use rust_decimal::Decimal;

use crate::domain::products::records::{ProductUuid, StoreUuid};

/// New Store Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewStore {
    pub uuid: StoreUuid,
    pub name: String,
    pub description: String,
}

/// New Product Data
///
/// Products are keyed by `(store, name)`; writing an existing pair replaces
/// its details and keeps the original uuid.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub store_uuid: StoreUuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub available_units: i32,
    pub image_path: String,
    pub sizes: Vec<String>,
}

/// Catalog listing filters; `None` means "any".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub store_name: Option<String>,
    pub store_uuid: Option<StoreUuid>,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}
