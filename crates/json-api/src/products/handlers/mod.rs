//! Product Handlers

pub(crate) mod category;
pub(crate) mod get;
pub(crate) mod image;
pub(crate) mod index;
pub(crate) mod store;
