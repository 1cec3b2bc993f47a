//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar, types::Json,
};

use crate::domain::{
    pagination::Pagination,
    products::{
        data::{NewProduct, NewStore, ProductFilter},
        records::{ProductRecord, ProductUuid, StoreRecord},
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const UPSERT_STORE_SQL: &str = include_str!("sql/upsert_store.sql");
const UPSERT_PRODUCT_SQL: &str = include_str!("sql/upsert_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
        pagination: Pagination,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.store_name.as_deref())
            .bind(filter.store_uuid)
            .bind(filter.category.as_deref())
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(pagination.limit)
            .bind(pagination.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_PRODUCTS_SQL)
            .bind(filter.store_name.as_deref())
            .bind(filter.store_uuid)
            .bind(filter.category.as_deref())
            .bind(filter.min_price)
            .bind(filter.max_price)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_store(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        store: &NewStore,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(UPSERT_STORE_SQL)
            .bind(store.uuid)
            .bind(&store.name)
            .bind(&store.description)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPSERT_PRODUCT_SQL)
            .bind(product.uuid)
            .bind(product.store_uuid)
            .bind(&product.name)
            .bind(&product.description)
            .bind(&product.category)
            .bind(product.price)
            .bind(product.available_units)
            .bind(&product.image_path)
            .bind(Json(&product.sizes))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            store_uuid: row.try_get("store_uuid")?,
            store_name: row.try_get("store_name")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            price: row.try_get("price")?,
            available_units: row.try_get("available_units")?,
            image_path: row.try_get("image_path")?,
            sizes: row.try_get::<Json<Vec<String>>, _>("sizes")?.0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StoreRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
