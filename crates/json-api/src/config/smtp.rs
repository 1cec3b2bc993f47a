//! SMTP Config

use boutique_app::notifications::{DEFAULT_CURRENCY, SmtpSettings};
use clap::Args;

/// Outbound mail settings. Without a user and password, mail is only logged.
#[derive(Debug, Args)]
pub struct SmtpConfig {
    /// SMTP server host
    #[arg(long, env = "SMTP_HOST", default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    /// SMTP server port
    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    /// SMTP user name
    #[arg(long, env = "SMTP_USER", default_value = "")]
    pub smtp_user: String,

    /// SMTP password
    #[arg(long, env = "SMTP_PASSWORD", default_value = "", hide_env_values = true)]
    pub smtp_password: String,

    /// Sender address; defaults to the SMTP user
    #[arg(long, env = "SMTP_FROM", default_value = "")]
    pub smtp_from: String,

    /// ISO 4217 currency used to format amounts in emails
    #[arg(long, env = "CURRENCY", default_value = DEFAULT_CURRENCY)]
    pub currency: String,
}

impl SmtpConfig {
    #[must_use]
    pub fn smtp_settings(&self) -> SmtpSettings {
        SmtpSettings {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            username: self.smtp_user.clone(),
            password: self.smtp_password.clone(),
            from: self.smtp_from.clone(),
            currency: self.currency.clone(),
        }
    }
}
