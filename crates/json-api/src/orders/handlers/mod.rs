//! Order Handlers

pub(crate) mod confirmation;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod payment;
