//! Access and refresh tokens.
//!
//! Both are HS256 JWTs signed with the same secret. Access tokens carry the
//! user's profile claims; refresh tokens carry only the user id in `sub`.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::domain::users::records::{UserRecord, UserUuid};

/// Default access token lifetime.
pub const DEFAULT_ACCESS_TTL: SignedDuration = SignedDuration::from_hours(24);

/// Default refresh token lifetime.
pub const DEFAULT_REFRESH_TTL: SignedDuration = SignedDuration::from_hours(168);

#[derive(Clone, PartialEq, Eq)]
pub struct TokenSettings {
    pub secret: String,
    pub access_ttl: SignedDuration,
    pub refresh_ttl: SignedDuration,
}

impl TokenSettings {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_ttl: DEFAULT_ACCESS_TTL,
            refresh_ttl: DEFAULT_REFRESH_TTL,
        }
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"**redacted**")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub user_id: UserUuid,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RefreshClaims {
    sub: UserUuid,
    exp: i64,
    iat: i64,
    nbf: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is invalid")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("token could not be signed")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        match error.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Invalid(error),
        }
    }
}

/// Issues and verifies signed tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl: SignedDuration,
    refresh_ttl: SignedDuration,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    #[must_use]
    pub fn new(settings: &TokenSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_nbf = true;

        Self {
            encoding: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding: DecodingKey::from_secret(settings.secret.as_bytes()),
            validation,
            access_ttl: settings.access_ttl,
            refresh_ttl: settings.refresh_ttl,
        }
    }

    /// Access token lifetime in seconds.
    #[must_use]
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl.as_secs()
    }

    pub fn issue_access(&self, user: &UserRecord) -> Result<String, TokenError> {
        let now = Timestamp::now().as_second();

        let claims = AccessClaims {
            user_id: user.uuid,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            exp: now + self.access_ttl.as_secs(),
            iat: now,
            nbf: now,
        };

        self.sign(&claims)
    }

    pub fn issue_refresh(&self, user: UserUuid) -> Result<String, TokenError> {
        let now = Timestamp::now().as_second();

        let claims = RefreshClaims {
            sub: user,
            exp: now + self.refresh_ttl.as_secs(),
            iat: now,
            nbf: now,
        };

        self.sign(&claims)
    }

    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.verify(token)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<UserUuid, TokenError> {
        self.verify::<RefreshClaims>(token).map(|claims| claims.sub)
    }

    fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(TokenError::Signing)
    }

    fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        let data = decode::<C>(token, &self.decoding, &self.validation)?;

        Ok(data.claims)
    }
}
