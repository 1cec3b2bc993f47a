//! Message templates.

use std::fmt::Write as _;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::notifications::Notification;

/// Brand name used in subjects and signatures.
pub const BRAND_NAME: &str = "Celeste x Mewave";

/// A notification rendered to plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
}

/// Render `notification`, formatting amounts in `currency`.
#[must_use]
pub fn render(notification: &Notification, currency: &Currency) -> RenderedMessage {
    match notification {
        Notification::Registration { first_name, .. } => RenderedMessage {
            subject: format!("Welcome to {BRAND_NAME}"),
            body: format!(
                "Hi {first_name},\n\n\
                 Welcome to {BRAND_NAME}!\n\n\
                 Your account has been created. You can now sign in and start shopping.\n\n\
                 The {BRAND_NAME} team\n"
            ),
        },
        Notification::PasswordReset { code, .. } => RenderedMessage {
            subject: format!("Password reset code - {BRAND_NAME}"),
            body: format!(
                "Hi,\n\n\
                 You asked to reset the password for your {BRAND_NAME} account.\n\n\
                 Your reset code is: {code}\n\n\
                 This code expires in 1 hour. If you did not ask for it, ignore this email.\n\n\
                 The {BRAND_NAME} team\n"
            ),
        },
        Notification::OrderConfirmation {
            order,
            total,
            items,
            ..
        } => {
            let mut lines = String::new();

            for item in items {
                let size = if item.size.is_empty() { "-" } else { &item.size };

                let _written = writeln!(
                    lines,
                    "- {} x {} (size: {size}) - {}",
                    item.product_name,
                    item.quantity,
                    format_amount(item.unit_price, currency),
                );
            }

            RenderedMessage {
                subject: format!("Order confirmation - {BRAND_NAME}"),
                body: format!(
                    "Hi,\n\n\
                     Thank you for your purchase!\n\n\
                     Order: {order}\n\
                     Total: {}\n\n\
                     Items:\n{lines}\n\
                     Your order is confirmed and will be processed shortly.\n\n\
                     The {BRAND_NAME} team\n",
                    format_amount(*total, currency),
                ),
            }
        }
    }
}

fn format_amount(amount: Decimal, currency: &Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}
