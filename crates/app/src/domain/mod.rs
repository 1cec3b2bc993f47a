//! Boutique Domain Concerns

pub mod carts;
pub mod orders;
pub mod owners;
pub mod pagination;
pub mod payments;
pub mod products;
pub mod users;
