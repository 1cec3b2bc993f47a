//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartItemUpdate, NewCartItem},
            errors::CartsServiceError,
            records::{CartItemRecord, CartItemUuid, CartLine, CartRecord, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        owners::Owner,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn resolve_cart(&self, owner: Owner) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        if let Some(cart) = self.carts_repository.find_cart(&mut tx, &owner).await? {
            tx.commit().await?;

            return Ok(cart);
        }

        let created = self
            .carts_repository
            .create_cart(&mut tx, CartUuid::new(), &owner)
            .await?;

        let cart = self
            .carts_repository
            .find_cart(&mut tx, &owner)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        tx.commit().await?;

        if created > 0 {
            debug!(cart_uuid = %cart.uuid, "created cart");
        }

        Ok(cart)
    }

    async fn add_item(
        &self,
        cart: CartUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if item.quantity < 1 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let available = self
            .items_repository
            .available_units(&mut tx, item.product_uuid)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        if item.quantity > available {
            return Err(CartsServiceError::InsufficientStock);
        }

        let item = self
            .items_repository
            .upsert_cart_item(&mut tx, cart, &item)
            .await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn update_item(
        &self,
        cart: CartUuid,
        item: CartItemUuid,
        update: CartItemUpdate,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if update.quantity < 1 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let available = self
            .items_repository
            .item_available_units(&mut tx, cart, item)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        if update.quantity > available {
            return Err(CartsServiceError::InsufficientStock);
        }

        let item = self
            .items_repository
            .update_cart_item(&mut tx, cart, item, &update)
            .await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn remove_item(
        &self,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.items_repository
            .delete_cart_item(&mut tx, cart, item)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn clear_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let removed = self.items_repository.clear_cart(&mut tx, cart).await?;

        tx.commit().await?;

        debug!(cart_uuid = %cart, removed, "cleared cart");

        Ok(())
    }

    async fn cart_lines(&self, cart: CartUuid) -> Result<Vec<CartLine>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self.items_repository.get_cart_lines(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(lines)
    }

    async fn cart_total(&self, cart: CartUuid) -> Result<Decimal, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self.items_repository.get_cart_total(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(total)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Find the owner's cart, creating it on first use.
    async fn resolve_cart(&self, owner: Owner) -> Result<CartRecord, CartsServiceError>;

    /// Add a product to the cart, merging with an existing line of the same size.
    async fn add_item(
        &self,
        cart: CartUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Change the quantity (and optionally the size) of a line in the cart.
    async fn update_item(
        &self,
        cart: CartUuid,
        item: CartItemUuid,
        update: CartItemUpdate,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Remove a line from the cart. Removing a missing line is not an error.
    async fn remove_item(
        &self,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError>;

    /// Remove every line from the cart.
    async fn clear_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError>;

    /// The cart's lines with current product details.
    async fn cart_lines(&self, cart: CartUuid) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Sum of quantity times current price over every line.
    async fn cart_total(&self, cart: CartUuid) -> Result<Decimal, CartsServiceError>;
}
