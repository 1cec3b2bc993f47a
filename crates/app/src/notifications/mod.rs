//! Notifications
//!
//! Outbound messages to shoppers. Sending is always best effort: callers hand
//! a [`Notification`] to [`dispatch`] and carry on without waiting.

mod log;
mod messages;
mod smtp;

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::orders::records::OrderUuid;

pub use log::LogNotifier;
pub use messages::{BRAND_NAME, RenderedMessage, render};
pub use smtp::{DEFAULT_CURRENCY, SmtpNotifier, SmtpSettings};

/// A purchased line as it appears in an order confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationLine {
    pub product_name: String,
    pub size: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Registration {
        to: String,
        first_name: String,
    },
    PasswordReset {
        to: String,
        code: String,
    },
    OrderConfirmation {
        to: String,
        order: OrderUuid,
        total: Decimal,
        items: Vec<NotificationLine>,
    },
}

impl Notification {
    #[must_use]
    pub fn recipient(&self) -> &str {
        match self {
            Self::Registration { to, .. }
            | Self::PasswordReset { to, .. }
            | Self::OrderConfirmation { to, .. } => to,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Registration { .. } => "registration",
            Self::PasswordReset { .. } => "password_reset",
            Self::OrderConfirmation { .. } => "order_confirmation",
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("invalid mailbox address")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message")]
    Message(#[from] lettre::error::Error),

    #[error("smtp transport error")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a single notification.
    async fn send(&self, notification: Notification) -> Result<(), NotifierError>;
}

/// Build the SMTP notifier, or a [`LogNotifier`] when no credentials are configured.
pub fn notifier_from_settings(settings: &SmtpSettings) -> Result<Arc<dyn Notifier>, NotifierError> {
    if settings.has_credentials() {
        return Ok(Arc::new(SmtpNotifier::new(settings)?));
    }

    info!("smtp credentials not configured, notifications will be logged");

    Ok(Arc::new(LogNotifier::new(settings.currency()?)))
}

/// Send `notification` on a background task. Failures are logged, never returned.
pub fn dispatch(notifier: Arc<dyn Notifier>, notification: Notification) {
    tokio::spawn(async move {
        let kind = notification.kind();

        if let Err(source) = notifier.send(notification).await {
            warn!(kind, "failed to send notification: {source}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_is_shared_by_every_kind() {
        let notification = Notification::PasswordReset {
            to: "ana@example.com".to_string(),
            code: "123456".to_string(),
        };

        assert_eq!(notification.recipient(), "ana@example.com");
        assert_eq!(notification.kind(), "password_reset");
    }

    #[tokio::test]
    async fn dispatch_delivers_on_a_background_task() {
        let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();

        let mut notifier = MockNotifier::new();

        notifier.expect_send().once().returning(move |notification| {
            let _sent = sender.send(notification);
            Ok(())
        });

        dispatch(
            Arc::new(notifier),
            Notification::Registration {
                to: "ana@example.com".to_string(),
                first_name: "Ana".to_string(),
            },
        );

        let delivered = receiver.recv().await;

        assert!(
            matches!(delivered, Some(Notification::Registration { .. })),
            "expected registration, got {delivered:?}"
        );
    }
}
