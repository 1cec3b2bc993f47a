//! Console delivery for environments without SMTP credentials.

use async_trait::async_trait;
use rusty_money::iso::Currency;
use tracing::info;

use crate::notifications::{Notification, Notifier, NotifierError, render};

#[derive(Debug, Clone, Copy)]
pub struct LogNotifier {
    currency: &'static Currency,
}

impl LogNotifier {
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self { currency }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: Notification) -> Result<(), NotifierError> {
        let rendered = render(&notification, self.currency);

        info!(
            to = notification.recipient(),
            kind = notification.kind(),
            subject = %rendered.subject,
            body = %rendered.body,
            "notification.logged"
        );

        Ok(())
    }
}
