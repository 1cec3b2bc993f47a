//! Payments service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::{Zoned, civil::Date};
use mockall::automock;
use tracing::{info, warn};

use crate::{
    domain::{
        orders::{
            OrdersService,
            records::{OrderRecord, OrderStatus, OrderUuid, PaymentStatus},
            service::order_confirmation,
        },
        payments::{data::CardDetails, errors::PaymentsServiceError, records::PaymentResult},
    },
    notifications::{Notifier, dispatch},
    validation::{is_valid_card_number, is_valid_cvv, is_valid_expiry},
};

/// Length of the order UUID prefix in transaction ids.
const TRANSACTION_PREFIX_LEN: usize = 8;

/// Approves any card whose fields are well formed.
#[derive(Clone)]
pub struct SimulatedPaymentsService {
    orders: Arc<dyn OrdersService>,
    notifier: Arc<dyn Notifier>,
}

impl SimulatedPaymentsService {
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersService>, notifier: Arc<dyn Notifier>) -> Self {
        Self { orders, notifier }
    }
}

impl fmt::Debug for SimulatedPaymentsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedPaymentsService")
            .finish_non_exhaustive()
    }
}

/// Why `card` would be declined on `today`, if at all.
fn decline_reason(card: &CardDetails, today: Date) -> Option<&'static str> {
    if !is_valid_card_number(&card.card_number) {
        return Some("invalid card number");
    }

    if !is_valid_cvv(&card.cvv) {
        return Some("invalid CVV");
    }

    if !is_valid_expiry(card.expiry_month, card.expiry_year, today) {
        return Some("invalid expiry date");
    }

    None
}

/// Whether `order` is already paid and at or past confirmation, so paying
/// again must not touch it.
fn already_settled(order: &OrderRecord) -> bool {
    match order.status {
        OrderStatus::Shipped | OrderStatus::Delivered => true,
        OrderStatus::Confirmed => order.payment_status == PaymentStatus::Completed,
        OrderStatus::Pending => false,
    }
}

#[async_trait]
impl PaymentsService for SimulatedPaymentsService {
    async fn process_payment(
        &self,
        order: OrderUuid,
        card: CardDetails,
    ) -> Result<PaymentResult, PaymentsServiceError> {
        let order = self.orders.get_order(order).await?;

        if let Some(reason) = decline_reason(&card, Zoned::now().date()) {
            info!(
                order_uuid = %order.uuid,
                card = %card.last_four(),
                reason,
                "payment declined"
            );

            return Ok(PaymentResult::failed(order.uuid, reason));
        }

        let transaction_id = format!("TXN_{}", order.uuid.prefix(TRANSACTION_PREFIX_LEN));

        if already_settled(&order) {
            info!(
                order_uuid = %order.uuid,
                status = %order.status,
                "payment repeated on settled order"
            );

            return Ok(PaymentResult {
                order_uuid: order.uuid,
                payment_status: PaymentStatus::Completed,
                transaction_id: Some(transaction_id),
                message: "order already paid".to_string(),
                confirmation_sent: false,
            });
        }

        if let Err(source) = self
            .orders
            .update_payment_status(order.uuid, PaymentStatus::Completed)
            .await
        {
            warn!(order_uuid = %order.uuid, "failed to record payment: {source}");

            return Ok(PaymentResult::failed(order.uuid, "failed to update order"));
        }

        if let Err(source) = self
            .orders
            .update_status(order.uuid, OrderStatus::Confirmed)
            .await
        {
            warn!(order_uuid = %order.uuid, "failed to confirm order: {source}");

            return Ok(PaymentResult::failed(order.uuid, "failed to confirm order"));
        }

        let confirmation = order_confirmation(&order);
        let confirmation_sent = confirmation.is_some();

        if let Some(notification) = confirmation {
            dispatch(Arc::clone(&self.notifier), notification);
        }

        info!(
            order_uuid = %order.uuid,
            %transaction_id,
            card = %card.last_four(),
            "payment completed"
        );

        Ok(PaymentResult {
            order_uuid: order.uuid,
            payment_status: PaymentStatus::Completed,
            transaction_id: Some(transaction_id),
            message: "payment processed successfully".to_string(),
            confirmation_sent,
        })
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Charge `card` for `order`.
    ///
    /// Only an unknown order is an error. A declined card or a failed status
    /// update comes back as a [`PaymentStatus::Failed`] result.
    /// Paying an order that is already paid and confirmed, shipped or
    /// delivered succeeds without writing or notifying.
    async fn process_payment(
        &self,
        order: OrderUuid,
        card: CardDetails,
    ) -> Result<PaymentResult, PaymentsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};
    use testresult::TestResult;
    use tokio::sync::mpsc;

    use crate::{
        domain::{
            carts::CartsService,
            orders::{MockOrdersService, OrdersServiceError, data::ShippingDetails},
            owners::Owner,
            products::ProductsService,
        },
        notifications::{MockNotifier, Notification},
        test::{
            TestContext,
            helpers::{dec, new_product, shipping},
        },
    };

    use super::*;

    fn valid_card() -> CardDetails {
        card_with_number("4111 1111 1111 1111")
    }

    fn card_with_number(number: &str) -> CardDetails {
        CardDetails {
            card_number: number.to_string(),
            card_holder: "Ana Gómez".to_string(),
            expiry_month: 12,
            expiry_year: 2099,
            cvv: "123".to_string(),
        }
    }

    fn order(email: &str) -> OrderRecord {
        let now = Timestamp::now();

        OrderRecord {
            uuid: OrderUuid::new(),
            owner: Owner::Session("abc".to_string()),
            total_amount: dec("30.00"),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            shipping: ShippingDetails {
                email: email.to_string(),
                ..ShippingDetails::default()
            },
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn orders_returning(order: &OrderRecord) -> MockOrdersService {
        let mut orders = MockOrdersService::new();
        let loaded = order.clone();

        orders
            .expect_get_order()
            .once()
            .withf({
                let uuid = order.uuid;
                move |requested| *requested == uuid
            })
            .return_once(move |_| Ok(loaded));

        orders
    }

    fn silent_notifier() -> Arc<dyn Notifier> {
        let mut notifier = MockNotifier::new();

        notifier.expect_send().never();

        Arc::new(notifier)
    }

    #[test]
    fn decline_reasons_cover_each_field() {
        let today = date(2026, 10, 16);

        assert_eq!(decline_reason(&valid_card(), today), None);
        assert_eq!(
            decline_reason(&card_with_number("4111 1111 1111 1112"), today),
            Some("invalid card number")
        );

        let mut short_cvv = valid_card();
        short_cvv.cvv = "12".to_string();

        assert_eq!(decline_reason(&short_cvv, today), Some("invalid CVV"));

        let mut expired = valid_card();
        expired.expiry_year = 2025;

        assert_eq!(
            decline_reason(&expired, today),
            Some("invalid expiry date")
        );
    }

    #[tokio::test]
    async fn luhn_failure_leaves_order_untouched() -> TestResult {
        let order = order("");
        let mut orders = orders_returning(&order);

        orders.expect_update_payment_status().never();
        orders.expect_update_status().never();

        let payments = SimulatedPaymentsService::new(Arc::new(orders), silent_notifier());

        let result = payments
            .process_payment(order.uuid, card_with_number("1234 5678 9012 3456"))
            .await?;

        assert_eq!(result.payment_status, PaymentStatus::Failed);
        assert_eq!(result.message, "invalid card number");
        assert!(result.transaction_id.is_none());
        assert!(!result.confirmation_sent);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_order_is_an_error() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        let payments = SimulatedPaymentsService::new(Arc::new(orders), silent_notifier());

        let result = payments
            .process_payment(OrderUuid::new(), valid_card())
            .await;

        assert!(
            matches!(result, Err(PaymentsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn failed_payment_update_is_reported_as_data() -> TestResult {
        let order = order("");
        let mut orders = orders_returning(&order);

        orders
            .expect_update_payment_status()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::InvalidData));
        orders.expect_update_status().never();

        let payments = SimulatedPaymentsService::new(Arc::new(orders), silent_notifier());

        let result = payments.process_payment(order.uuid, valid_card()).await?;

        assert_eq!(result.payment_status, PaymentStatus::Failed);
        assert_eq!(result.message, "failed to update order");

        Ok(())
    }

    #[tokio::test]
    async fn failed_confirmation_is_reported_as_data() -> TestResult {
        let order = order("");
        let mut orders = orders_returning(&order);

        orders
            .expect_update_payment_status()
            .once()
            .return_once(|_, _| Ok(()));
        orders
            .expect_update_status()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let payments = SimulatedPaymentsService::new(Arc::new(orders), silent_notifier());

        let result = payments.process_payment(order.uuid, valid_card()).await?;

        assert_eq!(result.payment_status, PaymentStatus::Failed);
        assert_eq!(result.message, "failed to confirm order");

        Ok(())
    }

    #[tokio::test]
    async fn successful_payment_confirms_and_notifies() -> TestResult {
        let order = order("ana@example.com");
        let mut orders = orders_returning(&order);

        orders
            .expect_update_payment_status()
            .once()
            .withf(|_, status| *status == PaymentStatus::Completed)
            .return_once(|_, _| Ok(()));
        orders
            .expect_update_status()
            .once()
            .withf(|_, status| *status == OrderStatus::Confirmed)
            .return_once(|_, _| Ok(()));

        let (sender, mut receiver) = mpsc::unbounded_channel();
        let mut notifier = MockNotifier::new();

        notifier.expect_send().once().returning(move |notification| {
            let _sent = sender.send(notification);
            Ok(())
        });

        let payments = SimulatedPaymentsService::new(Arc::new(orders), Arc::new(notifier));

        let result = payments.process_payment(order.uuid, valid_card()).await?;

        assert!(result.is_success());
        assert_eq!(result.message, "payment processed successfully");
        assert_eq!(
            result.transaction_id,
            Some(format!("TXN_{}", order.uuid.prefix(8)))
        );
        assert!(result.confirmation_sent);

        let sent = receiver.recv().await;

        assert!(
            matches!(
                sent,
                Some(Notification::OrderConfirmation { ref to, .. }) if to == "ana@example.com"
            ),
            "expected confirmation, got {sent:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn paying_a_shipped_order_changes_nothing() -> TestResult {
        let mut shipped = order("ana@example.com");
        shipped.status = OrderStatus::Shipped;
        shipped.payment_status = PaymentStatus::Completed;

        let mut orders = orders_returning(&shipped);

        orders.expect_update_payment_status().never();
        orders.expect_update_status().never();

        let payments = SimulatedPaymentsService::new(Arc::new(orders), silent_notifier());

        let result = payments.process_payment(shipped.uuid, valid_card()).await?;

        assert!(result.is_success());
        assert_eq!(result.message, "order already paid");
        assert!(!result.confirmation_sent);

        Ok(())
    }

    #[tokio::test]
    async fn repeat_payment_on_confirmed_order_sends_no_second_email() -> TestResult {
        let mut confirmed = order("ana@example.com");
        confirmed.status = OrderStatus::Confirmed;
        confirmed.payment_status = PaymentStatus::Completed;

        let mut orders = orders_returning(&confirmed);

        orders.expect_update_payment_status().never();
        orders.expect_update_status().never();

        let payments = SimulatedPaymentsService::new(Arc::new(orders), silent_notifier());

        let result = payments.process_payment(confirmed.uuid, valid_card()).await?;

        assert!(result.is_success());
        assert!(!result.confirmation_sent);

        Ok(())
    }

    #[test]
    fn only_unpaid_or_pending_orders_are_charged() {
        let mut record = order("");

        assert!(!already_settled(&record));

        record.status = OrderStatus::Confirmed;
        assert!(!already_settled(&record), "confirmed but unpaid is still chargeable");

        record.payment_status = PaymentStatus::Completed;
        assert!(already_settled(&record));

        record.status = OrderStatus::Delivered;
        record.payment_status = PaymentStatus::Pending;
        assert!(already_settled(&record));
    }

    #[tokio::test]
    async fn checkout_scenario_ends_paid_and_confirmed() -> TestResult {
        let ctx = TestContext::new().await;
        let store = ctx.create_store("Celeste").await?;
        let product = ctx
            .products
            .upsert_product(new_product(store.uuid, "Dress", dec("10.00"), 10))
            .await?;

        let owner = Owner::Session("abc".to_string());
        let cart = ctx.carts.resolve_cart(owner.clone()).await?;

        ctx.add_to_cart(cart.uuid, product.uuid, 2, "M").await?;
        ctx.add_to_cart(cart.uuid, product.uuid, 1, "M").await?;

        let order = ctx
            .orders
            .create_from_cart(cart.uuid, owner, shipping(""))
            .await?;

        assert_eq!(order.total_amount, dec("30.00"));
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 3);

        let declined = ctx
            .payments
            .process_payment(order.uuid, card_with_number("4111 1111 1111 1112"))
            .await?;

        assert!(!declined.is_success());

        let untouched = ctx.orders.get_order(order.uuid).await?;

        assert_eq!(untouched.status, OrderStatus::Pending);
        assert_eq!(untouched.payment_status, PaymentStatus::Pending);

        let paid = ctx
            .payments
            .process_payment(order.uuid, valid_card())
            .await?;

        assert!(paid.is_success());

        let confirmed = ctx.orders.get_order(order.uuid).await?;

        assert_eq!(confirmed.status, OrderStatus::Confirmed);
        assert_eq!(confirmed.payment_status, PaymentStatus::Completed);

        let again = ctx
            .payments
            .process_payment(order.uuid, valid_card())
            .await?;

        assert!(again.is_success());

        let still_confirmed = ctx.orders.get_order(order.uuid).await?;

        assert_eq!(still_confirmed.status, OrderStatus::Confirmed);
        assert_eq!(still_confirmed.payment_status, PaymentStatus::Completed);

        Ok(())
    }
}
