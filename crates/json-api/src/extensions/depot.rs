//! Depot helper extensions.

use std::any::Any;

use boutique_app::{
    auth::AccessClaims,
    domain::{owners::Owner, users::records::UserUuid},
};
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors, and for the
/// caller identity stored by the auth middleware.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_claims(&mut self, claims: AccessClaims);

    /// The authenticated user, if a valid bearer token was sent.
    fn user_uuid(&self) -> Option<UserUuid>;

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;

    /// Resolve the cart/order owner: the authenticated user, else `session`.
    fn owner_or_400(&self, session: Option<&str>) -> Result<Owner, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_claims(&mut self, claims: AccessClaims) {
        self.inject(claims);
    }

    fn user_uuid(&self) -> Option<UserUuid> {
        self.obtain::<AccessClaims>()
            .ok()
            .map(|claims| claims.user_id)
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.user_uuid()
            .ok_or_else(|| StatusError::unauthorized().brief("authentication required"))
    }

    fn owner_or_400(&self, session: Option<&str>) -> Result<Owner, StatusError> {
        Owner::try_from_parts(self.user_uuid(), session)
            .map_err(|error| StatusError::bad_request().brief(error.to_string()))
    }
}
