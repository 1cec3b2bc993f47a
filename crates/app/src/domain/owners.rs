//! Owners
//!
//! Carts and orders belong either to a registered user or to an anonymous
//! shopper identified by a client-generated session id, never both.

use sqlx::{Row, postgres::PgRow};
use thiserror::Error;

use crate::domain::users::records::UserUuid;

/// Who a cart or order belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Owner {
    User(UserUuid),
    Session(String),
}

/// Neither a user nor a non-blank session id was supplied.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("user_id or session_id required")]
pub struct MissingOwner;

impl Owner {
    /// Pick the owner from the available identity channels. A user takes
    /// precedence over a session; a blank session id counts as absent.
    pub fn try_from_parts(
        user: Option<UserUuid>,
        session: Option<&str>,
    ) -> Result<Self, MissingOwner> {
        if let Some(user) = user {
            return Ok(Self::User(user));
        }

        session
            .map(str::trim)
            .filter(|session| !session.is_empty())
            .map(|session| Self::Session(session.to_owned()))
            .ok_or(MissingOwner)
    }

    #[must_use]
    pub fn user_uuid(&self) -> Option<UserUuid> {
        match self {
            Self::User(user) => Some(*user),
            Self::Session(_) => None,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        match self {
            Self::User(_) => None,
            Self::Session(session) => Some(session),
        }
    }
}

/// Decode the `user_uuid` / `session_id` column pair.
pub(crate) fn try_get_owner(row: &PgRow) -> sqlx::Result<Owner> {
    let user: Option<UserUuid> = row.try_get("user_uuid")?;
    let session: Option<String> = row.try_get("session_id")?;

    match (user, session) {
        (Some(user), _) => Ok(Owner::User(user)),
        (None, Some(session)) => Ok(Owner::Session(session)),
        (None, None) => Err(sqlx::Error::Decode(
            "row has neither user_uuid nor session_id".into(),
        )),
    }
}
