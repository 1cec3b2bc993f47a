//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rand::{Rng, rngs::OsRng};
use tracing::{info, warn};

use crate::{
    auth::{
        data::NewUser,
        errors::AuthServiceError,
        passwords::{hash_password, verify_password},
        records::{AuthSession, RefreshedToken, TokenPair},
        repository::PgPasswordResetsRepository,
        tokens::{AccessClaims, TokenIssuer},
    },
    database::Db,
    domain::users::{
        data::non_empty,
        records::{UserRecord, UserUuid},
        repository::{PgUsersRepository, UserInsert},
    },
    notifications::{Notification, Notifier, dispatch},
    validation::{is_valid_email, is_valid_name, is_valid_password, is_valid_phone},
};

/// Attempts at drawing an unused reset code before giving up.
const RESET_CODE_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct PgAuthService {
    db: Db,
    users: PgUsersRepository,
    resets: PgPasswordResetsRepository,
    tokens: TokenIssuer,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgAuthService")
            .field("db", &self.db)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, tokens: TokenIssuer, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db,
            users: PgUsersRepository::new(),
            resets: PgPasswordResetsRepository::new(),
            tokens,
            notifier,
        }
    }

    fn issue_tokens(&self, user: &UserRecord) -> Result<TokenPair, AuthServiceError> {
        Ok(TokenPair {
            access_token: self.tokens.issue_access(user)?,
            refresh_token: self.tokens.issue_refresh(user.uuid)?,
            expires_in: self.tokens.access_ttl_seconds(),
        })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, user: NewUser) -> Result<AuthSession, AuthServiceError> {
        let email = non_empty(user.email);
        let phone = non_empty(user.phone);

        if email.is_none() && phone.is_none() {
            return Err(AuthServiceError::MissingIdentifier);
        }

        if !is_valid_name(&user.first_name) || !is_valid_name(&user.last_name) {
            return Err(AuthServiceError::InvalidName);
        }

        if !is_valid_password(&user.password) {
            return Err(AuthServiceError::WeakPassword);
        }

        if email.as_deref().is_some_and(|email| !is_valid_email(email)) {
            return Err(AuthServiceError::InvalidEmail);
        }

        if phone.as_deref().is_some_and(|phone| !is_valid_phone(phone)) {
            return Err(AuthServiceError::InvalidPhone);
        }

        let mut tx = self.db.begin().await?;

        if let Some(email) = email.as_deref()
            && self.users.email_in_use(&mut tx, email).await?
        {
            return Err(AuthServiceError::EmailTaken);
        }

        if let Some(phone) = phone.as_deref()
            && self.users.phone_in_use(&mut tx, phone, None).await?
        {
            return Err(AuthServiceError::PhoneTaken);
        }

        let password_hash = hash_password(&user.password)?;

        let created = self
            .users
            .create_user(
                &mut tx,
                UserInsert {
                    uuid: UserUuid::new(),
                    email: email.as_deref(),
                    phone: phone.as_deref(),
                    first_name: user.first_name.trim(),
                    last_name: user.last_name.trim(),
                    password_hash: &password_hash,
                },
            )
            .await?;

        tx.commit().await?;

        info!(user_uuid = %created.user.uuid, "registered user");

        if let Some(email) = email {
            dispatch(
                Arc::clone(&self.notifier),
                Notification::Registration {
                    to: email,
                    first_name: created.user.first_name.clone(),
                },
            );
        }

        let tokens = self.issue_tokens(&created.user)?;

        Ok(AuthSession {
            user: created.user,
            tokens,
        })
    }

    async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<AuthSession, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self
            .users
            .find_user_by_identifier(&mut tx, identifier.trim())
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        tx.commit().await?;

        match verify_password(password, &credentials.password_hash) {
            Ok(true) => {}
            Ok(false) => return Err(AuthServiceError::InvalidCredentials),
            Err(source) => {
                warn!(user_uuid = %credentials.user.uuid, "unreadable password hash: {source}");

                return Err(AuthServiceError::InvalidCredentials);
            }
        }

        let tokens = self.issue_tokens(&credentials.user)?;

        Ok(AuthSession {
            user: credentials.user,
            tokens,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedToken, AuthServiceError> {
        let user = self.tokens.verify_refresh(refresh_token)?;

        let mut tx = self.db.begin().await?;

        let credentials = self
            .users
            .find_user(&mut tx, user)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        Ok(RefreshedToken {
            access_token: self.tokens.issue_access(&credentials.user)?,
            expires_in: self.tokens.access_ttl_seconds(),
        })
    }

    async fn authenticate(&self, access_token: &str) -> Result<AccessClaims, AuthServiceError> {
        Ok(self.tokens.verify_access(access_token)?)
    }

    async fn request_password_reset(
        &self,
        identifier: &str,
    ) -> Result<Timestamp, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self
            .users
            .find_user_by_identifier(&mut tx, identifier.trim())
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let mut reset = None;

        for _ in 0..RESET_CODE_ATTEMPTS {
            reset = self
                .resets
                .create_password_reset(&mut tx, credentials.user.uuid, &generate_reset_code())
                .await?;

            if reset.is_some() {
                break;
            }
        }

        let reset = reset.ok_or(AuthServiceError::ResetCodeExhausted)?;

        tx.commit().await?;

        info!(user_uuid = %credentials.user.uuid, "issued password reset code");

        if let Some(email) = credentials.user.email {
            dispatch(
                Arc::clone(&self.notifier),
                Notification::PasswordReset {
                    to: email,
                    code: reset.reset_code,
                },
            );
        }

        Ok(reset.expires_at)
    }

    async fn verify_reset_code(
        &self,
        identifier: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self
            .users
            .find_user_by_identifier(&mut tx, identifier.trim())
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let reset = self
            .resets
            .find_password_reset(&mut tx, credentials.user.uuid, code.trim())
            .await?
            .ok_or(AuthServiceError::InvalidResetCode)?;

        if reset.expires_at < Timestamp::now() {
            return Err(AuthServiceError::ResetCodeExpired);
        }

        if reset.used {
            return Err(AuthServiceError::ResetCodeUsed);
        }

        if !is_valid_password(new_password) {
            return Err(AuthServiceError::WeakPassword);
        }

        let password_hash = hash_password(new_password)?;

        self.users
            .update_password(&mut tx, credentials.user.uuid, &password_hash)
            .await?;

        self.resets
            .mark_password_reset_used(&mut tx, reset.uuid)
            .await?;

        tx.commit().await?;

        info!(user_uuid = %credentials.user.uuid, "reset password");

        Ok(())
    }
}

/// Six random decimal digits, zero padded.
fn generate_reset_code() -> String {
    format!("{:06}", OsRng.gen_range(0..1_000_000_u32))
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and sign it in.
    async fn register(&self, user: NewUser) -> Result<AuthSession, AuthServiceError>;

    /// Sign in with an email address or phone number.
    async fn login(&self, identifier: &str, password: &str)
    -> Result<AuthSession, AuthServiceError>;

    /// Mint a new access token from a refresh token.
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedToken, AuthServiceError>;

    /// Verify an access token and return its claims.
    async fn authenticate(&self, access_token: &str) -> Result<AccessClaims, AuthServiceError>;

    /// Issue a one-hour reset code and return when it expires.
    async fn request_password_reset(&self, identifier: &str)
    -> Result<Timestamp, AuthServiceError>;

    /// Consume a reset code and set a new password.
    async fn verify_reset_code(
        &self,
        identifier: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), AuthServiceError>;
}
