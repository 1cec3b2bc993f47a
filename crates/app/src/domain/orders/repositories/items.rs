//! Order Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    carts::records::CartUuid,
    orders::records::{OrderItemRecord, OrderItemUuid, OrderUuid},
    products::records::ProductUuid,
};

const LOCK_CART_ITEMS_SQL: &str = include_str!("../sql/lock_cart_items.sql");
const RESERVE_STOCK_SQL: &str = include_str!("../sql/reserve_stock.sql");
const CLEAR_CART_ITEMS_SQL: &str = include_str!("../sql/clear_cart_items.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

/// A cart line locked for conversion into an order item.
#[derive(Debug, Clone)]
pub(crate) struct LockedCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: i32,
    pub size: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lock every line of `cart`, in product order so concurrent checkouts
    /// acquire row locks in the same sequence.
    pub(crate) async fn lock_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<LockedCartItem>, sqlx::Error> {
        query_as::<Postgres, LockedCartItem>(LOCK_CART_ITEMS_SQL)
            .bind(cart)
            .fetch_all(&mut **tx)
            .await
    }

    /// Take `quantity` units of `product` and return its current price, or
    /// `None` when there is not enough stock.
    pub(crate) async fn reserve_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: i32,
    ) -> Result<Option<Decimal>, sqlx::Error> {
        query_scalar::<Postgres, Decimal>(RESERVE_STOCK_SQL)
            .bind(product)
            .bind(quantity)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn clear_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_ITEMS_SQL)
            .bind(cart)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: &LockedCartItem,
        unit_price: Decimal,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::new())
            .bind(order)
            .bind(item.product_uuid)
            .bind(item.quantity)
            .bind(&item.size)
            .bind(unit_price)
            .fetch_one(&mut **tx)
            .await
    }

    /// Items of every order in `orders`.
    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let orders: Vec<Uuid> = orders.iter().copied().map(OrderUuid::into_uuid).collect();

        query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(orders)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for LockedCartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: row.try_get("product_uuid")?,
            quantity: row.try_get("quantity")?,
            size: row.try_get("size")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            order_uuid: row.try_get("order_uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            product_name: row.try_get("product_name")?,
            quantity: row.try_get("quantity")?,
            size: row.try_get("size")?,
            unit_price: row.try_get("unit_price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
