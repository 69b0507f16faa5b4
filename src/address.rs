//! Addresses

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A postal code (CEP) reduced to its 8 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

/// The input did not contain exactly 8 digits.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("postal code must have 8 digits, got {0}")]
pub struct InvalidPostalCode(pub usize);

impl PostalCode {
    /// Parses a postal code, ignoring any formatting characters.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPostalCode`] unless exactly 8 digits remain.
    pub fn parse(raw: &str) -> Result<Self, InvalidPostalCode> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

        if digits.len() == 8 {
            Ok(Self(digits))
        } else {
            Err(InvalidPostalCode(digits.len()))
        }
    }

    /// The bare digits, e.g. `01001000`.
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::masks::format_cep(&self.0))
    }
}

/// Address fields an external lookup can fill in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressFields {
    /// Street name.
    pub street: String,

    /// Complement reported by the lookup, if any.
    pub complement: String,

    /// Neighborhood.
    pub neighborhood: String,

    /// City.
    pub city: String,

    /// Two-letter state code.
    pub state: String,
}

/// The address kept for a registered user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAddress {
    /// Postal code as typed, e.g. `01001-000`.
    pub cep: String,

    /// Street name.
    pub address: String,

    /// House number.
    pub number: String,

    /// Optional complement.
    #[serde(default)]
    pub complement: String,

    /// Neighborhood.
    pub neighborhood: String,

    /// City.
    pub city: String,

    /// Two-letter state code.
    pub state: String,
}
