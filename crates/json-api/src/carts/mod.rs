//! Carts
//!
//! Every cart route works on the caller's own cart: the signed-in user's, or
//! the anonymous session's.

use std::sync::Arc;

use boutique_app::domain::carts::records::CartRecord;
use salvo::prelude::{Depot, StatusError};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

pub(crate) mod errors;
mod handlers;
pub(crate) mod items;

pub(crate) use handlers::*;

/// Find (or create) the cart of whoever is calling.
pub(crate) async fn caller_cart(
    depot: &Depot,
    session: Option<&str>,
) -> Result<CartRecord, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_or_400(session)?;

    state
        .app
        .carts
        .resolve_cart(owner)
        .await
        .map_err(into_status_error)
}
