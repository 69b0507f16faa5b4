//! Validation
//!
//! Field rules shared by the checkout and registration forms. Validation collects every
//! failing field rather than stopping at the first.

use std::fmt;

use thiserror::Error;

mod registration;
pub mod rules;

pub use registration::RegistrationForm;

/// A form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Buyer name.
    Name,

    /// Buyer CPF.
    TaxId,

    /// Buyer phone.
    Phone,

    /// Card number.
    CardNumber,

    /// Name printed on the card.
    CardHolderName,

    /// Card expiry, `MM/YY`.
    CardExpiry,

    /// Card security code.
    CardCvv,

    /// Items being bought.
    Cart,

    /// Account email.
    Email,

    /// Account password.
    Password,

    /// Password confirmation.
    ConfirmPassword,

    /// Postal code.
    PostalCode,

    /// Street.
    Address,

    /// House number.
    Number,

    /// Neighborhood.
    Neighborhood,

    /// City.
    City,

    /// State code.
    State,
}

impl Field {
    /// Field name as shown to users.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::TaxId => "cpf",
            Self::Phone => "phone",
            Self::CardNumber => "card number",
            Self::CardHolderName => "card holder name",
            Self::CardExpiry => "card expiry",
            Self::CardCvv => "card cvv",
            Self::Cart => "cart",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "password confirmation",
            Self::PostalCode => "cep",
            Self::Address => "address",
            Self::Number => "number",
            Self::Neighborhood => "neighborhood",
            Self::City => "city",
            Self::State => "state",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single field failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Empty or missing.
    #[error("is required")]
    Required,

    /// Fewer characters than allowed.
    #[error("must have at least {0} characters")]
    TooShort(usize),

    /// Wrong number of characters.
    #[error("must have exactly {0} characters")]
    WrongLength(usize),

    /// Does not match the expected layout.
    #[error("must match {0}")]
    Format(&'static str),

    /// Not a valid email address.
    #[error("is not a valid email")]
    InvalidEmail,

    /// Month outside 01-12.
    #[error("has an invalid month")]
    InvalidMonth,

    /// Differs from the field it must repeat.
    #[error("does not match")]
    Mismatch,

    /// Nothing to check out.
    #[error("is empty")]
    Empty,
}

/// Every failing field of a form, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<(Field, FieldError)>);

impl ValidationErrors {
    /// No failures yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure.
    pub fn push(&mut self, field: Field, error: FieldError) {
        self.0.push((field, error));
    }

    /// Record the outcome of a rule.
    pub fn check(&mut self, field: Field, outcome: Result<(), FieldError>) {
        if let Err(error) = outcome {
            self.push(field, error);
        }
    }

    /// Whether nothing failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The failure for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0
            .iter()
            .find(|(failed, _)| *failed == field)
            .map(|(_, error)| error)
    }

    /// Failing fields with their errors.
    pub fn iter(&self) -> impl Iterator<Item = &(Field, FieldError)> {
        self.0.iter()
    }

    /// `Ok` when nothing failed.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (field, error)) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field} {error}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a (Field, FieldError);
    type IntoIter = std::slice::Iter<'a, (Field, FieldError)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
