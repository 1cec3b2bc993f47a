//! SMTP delivery.

use std::fmt;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use rusty_money::iso::{self, Currency};

use crate::notifications::{Notification, Notifier, NotifierError, render};

/// Default ISO 4217 code for rendered amounts.
pub const DEFAULT_CURRENCY: &str = "COP";

#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub currency: String,
}

impl SmtpSettings {
    /// Whether credentials are present; without them mail is only logged.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }

    /// Look up the configured currency.
    pub fn currency(&self) -> Result<&'static Currency, NotifierError> {
        iso::find(self.currency.trim())
            .ok_or_else(|| NotifierError::UnknownCurrency(self.currency.clone()))
    }

    fn sender(&self) -> &str {
        if self.from.trim().is_empty() {
            &self.username
        } else {
            &self.from
        }
    }
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            username: String::new(),
            password: String::new(),
            from: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"**redacted**")
            .field("from", &self.from)
            .field("currency", &self.currency)
            .finish()
    }
}

/// Sends notifications over SMTP with STARTTLS.
#[derive(Clone)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    currency: &'static Currency,
}

impl fmt::Debug for SmtpNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpNotifier")
            .field("from", &self.from)
            .field("currency", &self.currency.iso_alpha_code)
            .finish_non_exhaustive()
    }
}

impl SmtpNotifier {
    pub fn new(settings: &SmtpSettings) -> Result<Self, NotifierError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: settings.sender().parse()?,
            currency: settings.currency()?,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, notification: Notification) -> Result<(), NotifierError> {
        let rendered = render(&notification, self.currency);

        let message = Message::builder()
            .from(self.from.clone())
            .to(notification.recipient().parse()?)
            .subject(rendered.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(rendered.body)?;

        self.transport.send(message).await?;

        Ok(())
    }
}
