//! Auth Data

/// Registration Data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}
