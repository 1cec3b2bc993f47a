//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    carts::records::{CartRecord, CartUuid},
    owners::{Owner, try_get_owner},
};

const FIND_CART_SQL: &str = include_str!("../sql/find_cart.sql");
const CREATE_CART_SQL: &str = include_str!("../sql/create_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &Owner,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(FIND_CART_SQL)
            .bind(owner.user_uuid())
            .bind(owner.session_id())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert a cart for `owner` unless one already exists.
    pub(crate) async fn create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        owner: &Owner,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CREATE_CART_SQL)
            .bind(cart)
            .bind(owner.user_uuid())
            .bind(owner.session_id())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            owner: try_get_owner(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
