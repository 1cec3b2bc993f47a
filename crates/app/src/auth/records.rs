//! Auth Records

use jiff::Timestamp;

use crate::{
    domain::users::records::{UserRecord, UserUuid},
    uuids::TypedUuid,
};

/// Password Reset UUID
pub type PasswordResetUuid = TypedUuid<PasswordResetRecord>;

/// A one-time password reset code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetRecord {
    pub uuid: PasswordResetUuid,
    pub user_uuid: UserUuid,
    pub reset_code: String,
    pub expires_at: Timestamp,
    pub used: bool,
    pub created_at: Timestamp,
}

/// Freshly issued access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,

    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// An authenticated user and their tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user: UserRecord,
    pub tokens: TokenPair,
}

/// A new access token minted from a refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedToken {
    pub access_token: String,
    pub expires_in: i64,
}
