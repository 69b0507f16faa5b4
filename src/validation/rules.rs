//! Field rules.
//!
//! Layout masks use `0` for a digit; every other mask character must appear literally.

use crate::validation::FieldError;

/// CPF layout.
pub const CPF_MASK: &str = "000.000.000-00";

/// Mobile phone layout.
pub const PHONE_MASK: &str = "(00) 00000-0000";

/// Postal code layout.
pub const CEP_MASK: &str = "00000-000";

/// Card number layout.
pub const CARD_NUMBER_MASK: &str = "0000 0000 0000 0000";

/// Card expiry layout.
pub const CARD_EXPIRY_MASK: &str = "00/00";

/// Non-blank.
///
/// # Errors
///
/// [`FieldError::Required`] when `value` is blank.
pub fn required(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(())
    }
}

/// Non-blank with at least `min` characters.
///
/// # Errors
///
/// [`FieldError::Required`] or [`FieldError::TooShort`].
pub fn min_chars(value: &str, min: usize) -> Result<(), FieldError> {
    required(value)?;

    if value.chars().count() < min {
        return Err(FieldError::TooShort(min));
    }

    Ok(())
}

/// Non-blank with exactly `len` alphabetic characters.
///
/// # Errors
///
/// [`FieldError::Required`] or [`FieldError::WrongLength`].
pub fn letters(value: &str, len: usize) -> Result<(), FieldError> {
    required(value)?;

    if value.chars().count() != len || !value.chars().all(char::is_alphabetic) {
        return Err(FieldError::WrongLength(len));
    }

    Ok(())
}

/// Non-blank and laid out as `mask`.
///
/// # Errors
///
/// [`FieldError::Required`] or [`FieldError::Format`].
pub fn matches_mask(value: &str, mask: &'static str) -> Result<(), FieldError> {
    required(value)?;

    let fits = value.chars().count() == mask.chars().count()
        && value.chars().zip(mask.chars()).all(|(ch, expected)| match expected {
            '0' => ch.is_ascii_digit(),
            literal => ch == literal,
        });

    if fits {
        Ok(())
    } else {
        Err(FieldError::Format(mask))
    }
}

/// Card expiry as `MM/YY` with a month between 01 and 12.
///
/// # Errors
///
/// [`FieldError::Required`], [`FieldError::Format`] or [`FieldError::InvalidMonth`].
pub fn card_expiry(value: &str) -> Result<(), FieldError> {
    matches_mask(value, CARD_EXPIRY_MASK)?;

    match value.get(..2).and_then(|month| month.parse::<u8>().ok()) {
        Some(1..=12) => Ok(()),
        _ => Err(FieldError::InvalidMonth),
    }
}

/// Three or four digits.
///
/// # Errors
///
/// [`FieldError::Required`] or [`FieldError::Format`].
pub fn card_cvv(value: &str) -> Result<(), FieldError> {
    required(value)?;

    if (3..=4).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(FieldError::Format("000 or 0000"))
    }
}

/// A plausible email address: `local@domain.tld` without whitespace.
///
/// # Errors
///
/// [`FieldError::Required`] or [`FieldError::InvalidEmail`].
pub fn email(value: &str) -> Result<(), FieldError> {
    required(value)?;

    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain.split('.').count() >= 2
            && domain.split('.').all(|label| !label.is_empty())
    }) && !value.chars().any(char::is_whitespace);

    if valid {
        Ok(())
    } else {
        Err(FieldError::InvalidEmail)
    }
}
