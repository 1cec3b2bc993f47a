//! Payments
//!
//! A simulated gateway: card fields are checked locally and no money moves.

pub mod data;
pub mod errors;
pub mod records;
pub mod service;

pub use errors::PaymentsServiceError;
pub use service::*;
