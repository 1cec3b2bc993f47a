//! Payment Data

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Card details submitted for a payment. Wiped from memory on drop.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CardDetails {
    pub card_number: String,
    pub card_holder: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub cvv: String,
}

impl CardDetails {
    /// Last four digits of the card number, for logs.
    #[must_use]
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self
            .card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();

        digits.iter().skip(digits.len().saturating_sub(4)).collect()
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_number", &format_args!("**** {}", self.last_four()))
            .field("card_holder", &self.card_holder)
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &"***")
            .finish()
    }
}
