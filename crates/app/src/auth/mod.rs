//! Authentication

pub mod data;
mod errors;
pub mod passwords;
pub mod records;
mod repository;
mod service;
pub mod tokens;

pub use errors::*;
pub use service::*;
pub use tokens::{AccessClaims, TokenError, TokenIssuer, TokenSettings};
