//! Orders service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::records::CartUuid,
        orders::{
            data::ShippingDetails,
            errors::OrdersServiceError,
            records::{OrderRecord, OrderStatus, OrderUuid, PaymentStatus},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
        owners::Owner,
        pagination::{Page, Pagination},
    },
    notifications::{Notification, NotificationLine, Notifier, dispatch},
};

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    notifier: Arc<dyn Notifier>,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            notifier,
        }
    }
}

impl fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

/// The confirmation message for `order`, if it has a shipping email.
#[must_use]
pub fn order_confirmation(order: &OrderRecord) -> Option<Notification> {
    let to = order.shipping.confirmation_email()?;

    Some(Notification::OrderConfirmation {
        to: to.to_string(),
        order: order.uuid,
        total: order.total_amount,
        items: order
            .items
            .iter()
            .map(|item| NotificationLine {
                product_name: item.product_name.clone(),
                size: item.size.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect(),
    })
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_from_cart(
        &self,
        cart: CartUuid,
        owner: Owner,
        shipping: ShippingDetails,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self.items_repository.lock_cart_items(&mut tx, cart).await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let mut prices = Vec::with_capacity(lines.len());
        let mut total = Decimal::ZERO;

        for line in &lines {
            let price = self
                .items_repository
                .reserve_stock(&mut tx, line.product_uuid, line.quantity)
                .await?
                .ok_or(OrdersServiceError::InsufficientStock)?;

            total += price * Decimal::from(line.quantity);
            prices.push(price);
        }

        let mut order = self
            .orders_repository
            .create_order(&mut tx, &owner, total.round_dp(2), &shipping)
            .await?;

        for (line, price) in lines.iter().zip(prices) {
            let item = self
                .items_repository
                .create_order_item(&mut tx, order.uuid, line, price)
                .await?;

            order.items.push(item);
        }

        self.items_repository.clear_cart_items(&mut tx, cart).await?;

        tx.commit().await?;

        info!(
            order_uuid = %order.uuid,
            total = %order.total_amount,
            items = order.items.len(),
            "created order"
        );

        if let Some(notification) = order_confirmation(&order) {
            dispatch(Arc::clone(&self.notifier), notification);
        }

        Ok(order)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self.orders_repository.get_order(&mut tx, order).await?;

        order.items = self
            .items_repository
            .get_order_items(&mut tx, &[order.uuid])
            .await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(
        &self,
        owner: Owner,
        pagination: Pagination,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self
            .orders_repository
            .list_orders(&mut tx, &owner, pagination)
            .await?;

        let total = self.orders_repository.count_orders(&mut tx, &owner).await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut items: FxHashMap<OrderUuid, Vec<_>> = FxHashMap::default();

        for item in self
            .items_repository
            .get_order_items(&mut tx, &uuids)
            .await?
        {
            items.entry(item.order_uuid).or_default().push(item);
        }

        tx.commit().await?;

        for order in &mut orders {
            order.items = items.remove(&order.uuid).unwrap_or_default();
        }

        Ok(Page {
            items: orders,
            total,
            pagination,
        })
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .orders_repository
            .update_order_status(&mut tx, order, status)
            .await?;

        if updated == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(order_uuid = %order, %status, "updated order status");

        Ok(())
    }

    async fn update_payment_status(
        &self,
        order: OrderUuid,
        status: PaymentStatus,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .orders_repository
            .update_payment_status(&mut tx, order, status)
            .await?;

        if updated == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(order_uuid = %order, %status, "updated payment status");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the cart's lines into an order, reserving stock and emptying the
    /// cart in the same transaction.
    async fn create_from_cart(
        &self,
        cart: CartUuid,
        owner: Owner,
        shipping: ShippingDetails,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve an order with its items.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// The owner's orders, newest first.
    async fn list_orders(
        &self,
        owner: Owner,
        pagination: Pagination,
    ) -> Result<Page<OrderRecord>, OrdersServiceError>;

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError>;

    async fn update_payment_status(
        &self,
        order: OrderUuid,
        status: PaymentStatus,
    ) -> Result<(), OrdersServiceError>;
}
