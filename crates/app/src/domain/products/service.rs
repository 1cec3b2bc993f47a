//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        pagination::{Page, Pagination},
        products::{
            data::{NewProduct, NewStore, ProductFilter},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid, StoreRecord, StoreUuid},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
        pagination: Pagination,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self.repository.count_products(&mut tx, &filter).await?;

        let items = self
            .repository
            .list_products(&mut tx, &filter, pagination)
            .await?;

        tx.commit().await?;

        Ok(Page {
            items,
            total,
            pagination,
        })
    }

    async fn list_store_products(
        &self,
        store: StoreUuid,
        pagination: Pagination,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let filter = ProductFilter {
            store_uuid: Some(store),
            ..ProductFilter::default()
        };

        self.list_products(filter, pagination).await
    }

    async fn list_category_products(
        &self,
        category: String,
        pagination: Pagination,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let filter = ProductFilter {
            category: Some(category),
            ..ProductFilter::default()
        };

        self.list_products(filter, pagination).await
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn upsert_store(&self, store: NewStore) -> Result<StoreRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let store = self.repository.upsert_store(&mut tx, &store).await?;

        tx.commit().await?;

        Ok(store)
    }

    async fn upsert_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if product.name.trim().is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let product = self.repository.upsert_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(product)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// List catalog products matching `filter`, one page at a time.
    async fn list_products(
        &self,
        filter: ProductFilter,
        pagination: Pagination,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// List the products sold by a single store.
    async fn list_store_products(
        &self,
        store: StoreUuid,
        pagination: Pagination,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// List the products in a single category.
    async fn list_category_products(
        &self,
        category: String,
        pagination: Pagination,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Create a store, or refresh the description of the store with the same name.
    async fn upsert_store(&self, store: NewStore) -> Result<StoreRecord, ProductsServiceError>;

    /// Create a product, or refresh the product with the same store and name.
    async fn upsert_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;
}
