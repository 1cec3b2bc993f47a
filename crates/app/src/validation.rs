//! Input validators shared by the auth, users and payments services.

use std::sync::LazyLock;

use jiff::civil::Date;
use regex::Regex;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
const NAME_PATTERN: &str = r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s]+$";

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

const CARD_NUMBER_LENGTH: usize = 16;

static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());
static NAME: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(NAME_PATTERN).ok());

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.as_ref().is_some_and(|pattern| pattern.is_match(email))
}

/// Phone numbers may carry spaces, dashes, parentheses and a leading `+`;
/// what remains must be 10 to 15 digits.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '+'))
        .collect();

    (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && NAME.as_ref().is_some_and(|pattern| pattern.is_match(name))
}

/// Card numbers are 16 digits after removing spaces and dashes, and must pass
/// the Luhn checksum.
#[must_use]
pub fn is_valid_card_number(number: &str) -> bool {
    let digits: Vec<u32> = number
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .map(|c| c.to_digit(10))
        .collect::<Option<_>>()
        .unwrap_or_default();

    digits.len() == CARD_NUMBER_LENGTH && luhn_checksum(&digits) % 10 == 0
}

fn luhn_checksum(digits: &[u32]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(position, &digit)| {
            if position % 2 == 1 {
                let doubled = digit * 2;

                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum()
}

#[must_use]
pub fn is_valid_cvv(cvv: &str) -> bool {
    (3..=4).contains(&cvv.len()) && cvv.chars().all(|c| c.is_ascii_digit())
}

/// Month must be 1-12 and the year no earlier than `today`'s year.
#[must_use]
pub fn is_valid_expiry(month: i32, year: i32, today: Date) -> bool {
    (1..=12).contains(&month) && year >= i32::from(today.year())
}
