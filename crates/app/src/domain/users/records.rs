//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user together with the stored password hash. Never leaves the crate.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: UserRecord,
    pub(crate) password_hash: String,
}
