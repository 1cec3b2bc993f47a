//! Order Data

/// Shipping Details
///
/// Copied onto the order when it is placed. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub address: String,
    pub address2: String,
    pub postal_code: String,
    pub notes: String,
}

impl ShippingDetails {
    /// The address to send a confirmation to, if one was given.
    #[must_use]
    pub fn confirmation_email(&self) -> Option<&str> {
        let email = self.email.trim();

        (!email.is_empty()).then_some(email)
    }
}
