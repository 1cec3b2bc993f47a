//! Products

pub(crate) mod errors;
mod handlers;
pub(crate) mod images;

pub(crate) use handlers::*;
