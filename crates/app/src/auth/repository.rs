//! Password Resets Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::records::{PasswordResetRecord, PasswordResetUuid},
    domain::users::records::UserUuid,
};

const CREATE_PASSWORD_RESET_SQL: &str = include_str!("sql/create_password_reset.sql");
const FIND_PASSWORD_RESET_SQL: &str = include_str!("sql/find_password_reset.sql");
const MARK_PASSWORD_RESET_USED_SQL: &str = include_str!("sql/mark_password_reset_used.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPasswordResetsRepository;

impl PgPasswordResetsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Store a reset code valid for one hour. Returns `None` when the code is
    /// already taken, without aborting the transaction.
    pub(crate) async fn create_password_reset(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        code: &str,
    ) -> Result<Option<PasswordResetRecord>, sqlx::Error> {
        query_as::<Postgres, PasswordResetRecord>(CREATE_PASSWORD_RESET_SQL)
            .bind(PasswordResetUuid::new())
            .bind(user)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_password_reset(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        code: &str,
    ) -> Result<Option<PasswordResetRecord>, sqlx::Error> {
        query_as::<Postgres, PasswordResetRecord>(FIND_PASSWORD_RESET_SQL)
            .bind(user)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn mark_password_reset_used(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reset: PasswordResetUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_PASSWORD_RESET_USED_SQL)
            .bind(reset)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for PasswordResetRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            reset_code: row.try_get("reset_code")?,
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            used: row.try_get("used")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
