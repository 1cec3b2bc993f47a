//! Payment Records

use crate::domain::orders::records::{OrderUuid, PaymentStatus};

/// Outcome of a payment attempt. Declines are reported here, not as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentResult {
    pub order_uuid: OrderUuid,
    pub payment_status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub message: String,
    pub confirmation_sent: bool,
}

impl PaymentResult {
    pub(crate) fn failed(order_uuid: OrderUuid, message: impl Into<String>) -> Self {
        Self {
            order_uuid,
            payment_status: PaymentStatus::Failed,
            transaction_id: None,
            message: message.into(),
            confirmation_sent: false,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.payment_status == PaymentStatus::Completed
    }
}
