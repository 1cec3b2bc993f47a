//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::users::{
    data::ProfileUpdate,
    records::{UserCredentials, UserRecord, UserUuid},
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const FIND_USER_SQL: &str = include_str!("sql/find_user.sql");
const FIND_USER_BY_IDENTIFIER_SQL: &str = include_str!("sql/find_user_by_identifier.sql");
const EMAIL_IN_USE_SQL: &str = include_str!("sql/email_in_use.sql");
const PHONE_IN_USE_SQL: &str = include_str!("sql/phone_in_use.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("sql/update_profile.sql");
const UPDATE_PASSWORD_SQL: &str = include_str!("sql/update_password.sql");

/// Statements run in order to remove a user and everything they own.
const DELETE_ACCOUNT_SQL: [&str; 6] = [
    include_str!("sql/delete_user_order_items.sql"),
    include_str!("sql/delete_user_orders.sql"),
    include_str!("sql/delete_user_cart_items.sql"),
    include_str!("sql/delete_user_carts.sql"),
    include_str!("sql/delete_user_password_resets.sql"),
    include_str!("sql/delete_user.sql"),
];

/// Columns for a new user row.
#[derive(Debug, Clone)]
pub(crate) struct UserInsert<'a> {
    pub(crate) uuid: UserUuid,
    pub(crate) email: Option<&'a str>,
    pub(crate) phone: Option<&'a str>,
    pub(crate) first_name: &'a str,
    pub(crate) last_name: &'a str,
    pub(crate) password_hash: &'a str,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserInsert<'_>,
    ) -> Result<UserCredentials, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(CREATE_USER_SQL)
            .bind(user.uuid)
            .bind(user.email)
            .bind(user.phone)
            .bind(user.first_name)
            .bind(user.last_name)
            .bind(user.password_hash)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(FIND_USER_SQL)
            .bind(user)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Find a user by email address or phone number.
    pub(crate) async fn find_user_by_identifier(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        identifier: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(FIND_USER_BY_IDENTIFIER_SQL)
            .bind(identifier)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn email_in_use(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(EMAIL_IN_USE_SQL)
            .bind(email)
            .fetch_one(&mut **tx)
            .await
    }

    /// Whether `phone` belongs to any user other than `except`.
    pub(crate) async fn phone_in_use(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        phone: &str,
        except: Option<UserUuid>,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(PHONE_IN_USE_SQL)
            .bind(phone)
            .bind(except)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        update: &ProfileUpdate,
    ) -> Result<UserCredentials, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(UPDATE_PROFILE_SQL)
            .bind(user)
            .bind(update.first_name.as_deref())
            .bind(update.last_name.as_deref())
            .bind(update.phone.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_password(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        password_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PASSWORD_SQL)
            .bind(user)
            .bind(password_hash)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Remove the user and everything they own. Returns the number of user rows deleted.
    pub(crate) async fn delete_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let mut rows_affected = 0;

        for sql in DELETE_ACCOUNT_SQL {
            rows_affected = query(sql)
                .bind(user)
                .execute(&mut **tx)
                .await?
                .rows_affected();
        }

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user: UserRecord::from_row(row)?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}
