//! Order Repositories

mod items;
mod orders;

pub(crate) use items::{LockedCartItem, PgOrderItemsRepository};
pub(crate) use orders::PgOrdersRepository;
