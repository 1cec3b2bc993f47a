//! Orders Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    orders::{
        data::ShippingDetails,
        records::{OrderRecord, OrderStatus, OrderUuid, PaymentStatus, UnknownStatus},
    },
    owners::{Owner, try_get_owner},
    pagination::Pagination,
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("../sql/count_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");
const UPDATE_PAYMENT_STATUS_SQL: &str = include_str!("../sql/update_payment_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an order header in `pending`/`pending`. Items are loaded separately.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &Owner,
        total_amount: Decimal,
        shipping: &ShippingDetails,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(OrderUuid::new())
            .bind(owner.user_uuid())
            .bind(owner.session_id())
            .bind(total_amount)
            .bind(shipping.name.trim())
            .bind(shipping.phone.trim())
            .bind(shipping.email.trim())
            .bind(shipping.city.trim())
            .bind(shipping.address.trim())
            .bind(shipping.address2.trim())
            .bind(shipping.postal_code.trim())
            .bind(shipping.notes.trim())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order)
            .fetch_one(&mut **tx)
            .await
    }

    /// A page of the owner's orders, newest first.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &Owner,
        pagination: Pagination,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(owner.user_uuid())
            .bind(owner.session_id())
            .bind(pagination.limit)
            .bind(pagination.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: &Owner,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_ORDERS_SQL)
            .bind(owner.user_uuid())
            .bind(owner.session_id())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_STATUS_SQL)
            .bind(order)
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn update_payment_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: PaymentStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PAYMENT_STATUS_SQL)
            .bind(order)
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn decode_status<T>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr<Err = UnknownStatus>,
{
    row.try_get::<String, _>(column)?
        .parse()
        .map_err(|error| sqlx::Error::Decode(Box::new(error)))
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            owner: try_get_owner(row)?,
            total_amount: row.try_get("total_amount")?,
            status: decode_status(row, "status")?,
            payment_status: decode_status(row, "payment_status")?,
            shipping: ShippingDetails {
                name: row.try_get("shipping_name")?,
                phone: row.try_get("shipping_phone")?,
                email: row.try_get("shipping_email")?,
                city: row.try_get("shipping_city")?,
                address: row.try_get("shipping_address")?,
                address2: row.try_get("shipping_address2")?,
                postal_code: row.try_get("shipping_postal_code")?,
                notes: row.try_get("shipping_notes")?,
            },
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
