//! PhoneNumber value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A type-safe wrapper for phone numbers.
///
/// Construction trims the input and requires at least one digit; the
/// formatted form is otherwise stored verbatim. Duplicate detection works on
/// [`PhoneNumber::digits_only`], so `"+1 (555) 123-4567"` and `"5551234567"`
/// collide while numbers whose digit sequences differ (for example a number
/// with and without an international prefix) do not.
///
/// # Example
///
/// ```
/// use vcf_collector::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("+1-555-1234").unwrap();
/// assert_eq!(phone.as_str(), "+1-555-1234");
/// assert_eq!(phone.digits_only(), "15551234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber from raw user input.
    ///
    /// Leading/trailing whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyPhone` if the trimmed input is empty,
    /// or `ValidationError::InvalidPhone` if it contains no digits.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let phone = phone.into().trim().to_string();

        if phone.is_empty() {
            return Err(ValidationError::EmptyPhone);
        }
        if !phone.chars().any(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidPhone(phone));
        }

        Ok(Self(phone))
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Get the phone number with only digits (no formatting).
    ///
    /// This is the normalization used for duplicate comparison.
    pub fn digits_only(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

// Serde support - serialize as string
impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::new(s).map_err(serde::de::Error::custom)
    }
}

// Display support
impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
