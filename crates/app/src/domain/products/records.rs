//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Store UUID
pub type StoreUuid = TypedUuid<StoreRecord>;

/// Store Record
#[derive(Debug, Clone)]
pub struct StoreRecord {
    pub uuid: StoreUuid,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
}

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub store_uuid: StoreUuid,
    pub store_name: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub available_units: i32,
    pub image_path: String,
    pub sizes: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
