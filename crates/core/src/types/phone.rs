//! Phone number type for order-intent submissions.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input contains no digits.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains more digits than allowed.
    #[error("phone number cannot exceed {max} digits")]
    TooLong {
        /// Maximum allowed digit count.
        max: usize,
    },
    /// The input contains fewer digits than required.
    #[error("phone number must be exactly {expected} digits (got {got})")]
    TooShort {
        /// Required digit count.
        expected: usize,
        /// Digits actually present.
        got: usize,
    },
}

/// A ten-digit phone number.
///
/// Every non-digit character is stripped before validation, so
/// `"(555) 123-4567"` and `"5551234567"` parse to the same value.
///
/// ## Examples
///
/// ```
/// use ebooks_core::PhoneNumber;
///
/// assert_eq!(PhoneNumber::parse("(555) 123-4567").unwrap().as_str(), "5551234567");
/// assert!(PhoneNumber::parse("555-1234").is_err());
/// assert!(PhoneNumber::parse("555 123 4567 8").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Number of digits a phone number must have.
    pub const DIGITS: usize = 10;

    /// Parse a `PhoneNumber` from free-form input.
    ///
    /// # Errors
    ///
    /// Returns an error if, after stripping non-digits, the input:
    /// - Is empty
    /// - Has more than 10 digits
    /// - Has fewer than 10 digits
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();

        match digits.len() {
            0 => Err(PhoneError::Empty),
            n if n > Self::DIGITS => Err(PhoneError::TooLong { max: Self::DIGITS }),
            n if n < Self::DIGITS => Err(PhoneError::TooShort {
                expected: Self::DIGITS,
                got: n,
            }),
            _ => Ok(Self(digits)),
        }
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhoneNumber` and returns its digits.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
