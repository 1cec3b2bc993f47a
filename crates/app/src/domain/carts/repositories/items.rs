//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    carts::{
        data::{CartItemUpdate, NewCartItem},
        records::{CartItemRecord, CartItemUuid, CartLine, CartUuid},
    },
    products::records::ProductUuid,
};

const GET_AVAILABLE_UNITS_SQL: &str = include_str!("../sql/get_available_units.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const GET_CART_ITEM_AVAILABLE_UNITS_SQL: &str =
    include_str!("../sql/get_cart_item_available_units.sql");
const UPDATE_CART_ITEM_SQL: &str = include_str!("../sql/update_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const CLEAR_CART_SQL: &str = include_str!("../sql/clear_cart.sql");
const GET_CART_LINES_SQL: &str = include_str!("../sql/get_cart_lines.sql");
const GET_CART_TOTAL_SQL: &str = include_str!("../sql/get_cart_total.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Current stock of a product, or `None` when it does not exist.
    pub(crate) async fn available_units(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<i32>, sqlx::Error> {
        query_scalar::<Postgres, i32>(GET_AVAILABLE_UNITS_SQL)
            .bind(product)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert a line, or add to the quantity of the line with the same product and size.
    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: &NewCartItem,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(UPSERT_CART_ITEM_SQL)
            .bind(CartItemUuid::new())
            .bind(cart)
            .bind(item.product_uuid)
            .bind(item.quantity)
            .bind(item.size.trim())
            .fetch_one(&mut **tx)
            .await
    }

    /// Lock a line of `cart` and return its product's current stock.
    pub(crate) async fn item_available_units(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<Option<i32>, sqlx::Error> {
        query_scalar::<Postgres, i32>(GET_CART_ITEM_AVAILABLE_UNITS_SQL)
            .bind(item)
            .bind(cart)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
        update: &CartItemUpdate,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(UPDATE_CART_ITEM_SQL)
            .bind(item)
            .bind(cart)
            .bind(update.quantity)
            .bind(update.size.as_deref().map(str::trim))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item)
            .bind(cart)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(cart)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(GET_CART_LINES_SQL)
            .bind(cart)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Decimal, sqlx::Error> {
        query_scalar::<Postgres, Decimal>(GET_CART_TOTAL_SQL)
            .bind(cart)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            cart_uuid: row.try_get("cart_uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            quantity: row.try_get("quantity")?,
            size: row.try_get("size")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            product_name: row.try_get("product_name")?,
            price: row.try_get("price")?,
            image_path: row.try_get("image_path")?,
            quantity: row.try_get("quantity")?,
            size: row.try_get("size")?,
        })
    }
}
