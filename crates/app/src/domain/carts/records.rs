//! Cart Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{owners::Owner, products::records::ProductUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub owner: Owner,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub quantity: i32,
    pub size: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart item joined with the product's current name, price and image.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub price: Decimal,
    pub image_path: String,
    pub quantity: i32,
    pub size: String,
}

impl CartLine {
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
