//! Cart Data

use crate::domain::products::records::ProductUuid;

/// New Cart Item Data
///
/// Merged into an existing line when the cart already holds the same product
/// in the same size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: i32,
    pub size: String,
}

/// Cart Item Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemUpdate {
    pub quantity: i32,

    /// Replaces the size only when present and non-empty.
    pub size: Option<String>,
}
