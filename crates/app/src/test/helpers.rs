//! Test Helpers

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{
    auth::data::NewUser,
    domain::{
        orders::data::ShippingDetails,
        products::{
            data::NewProduct,
            records::{ProductUuid, StoreUuid},
        },
    },
};

pub(crate) fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("invalid decimal literal")
}

pub(crate) fn new_product(store: StoreUuid, name: &str, price: Decimal, units: i32) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        store_uuid: store,
        name: name.to_string(),
        description: String::new(),
        category: "Dresses".to_string(),
        price,
        available_units: units,
        image_path: format!("images/{}.jpg", name.to_lowercase()),
        sizes: vec!["S".to_string(), "M".to_string(), "L".to_string()],
    }
}

pub(crate) fn new_user(email: &str) -> NewUser {
    NewUser {
        email: Some(email.to_string()),
        phone: None,
        first_name: "Ana".to_string(),
        last_name: "Gómez".to_string(),
        password: "password123".to_string(),
    }
}

pub(crate) fn shipping(email: &str) -> ShippingDetails {
    ShippingDetails {
        name: "Ana Gómez".to_string(),
        phone: "3001234567".to_string(),
        email: email.to_string(),
        city: "Bogotá".to_string(),
        address: "Calle 1 # 2-3".to_string(),
        postal_code: "110111".to_string(),
        ..ShippingDetails::default()
    }
}
