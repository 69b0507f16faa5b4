//! Checkout form.

use crate::{
    orders::{Customer, PaymentMethod},
    validation::{
        Field, FieldError, ValidationErrors,
        rules::{self, CARD_NUMBER_MASK, CPF_MASK, PHONE_MASK},
    },
};

/// Card fields, only read when paying by card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDetails {
    /// `0000 0000 0000 0000`.
    pub number: String,

    /// Name printed on the card.
    pub holder_name: String,

    /// `MM/YY`.
    pub expiry: String,

    /// 3 or 4 digits.
    pub cvv: String,
}

/// What the buyer submits at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Full name.
    pub name: String,

    /// CPF, `000.000.000-00`.
    pub tax_id: String,

    /// Phone, `(00) 00000-0000`.
    pub phone: String,

    /// Chosen payment method.
    pub payment_method: PaymentMethod,

    /// Card fields. Ignored for PIX and boleto.
    pub card: Option<CardDetails>,
}

impl CheckoutForm {
    /// Check every field. Card fields are checked only when paying by card.
    ///
    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        self.collect_errors(&mut errors);

        errors.into_result()
    }

    pub(crate) fn collect_errors(&self, errors: &mut ValidationErrors) {
        errors.check(Field::Name, rules::min_chars(&self.name, 3));
        errors.check(Field::TaxId, rules::matches_mask(&self.tax_id, CPF_MASK));
        errors.check(Field::Phone, rules::matches_mask(&self.phone, PHONE_MASK));

        if self.payment_method != PaymentMethod::Card {
            return;
        }

        let Some(card) = &self.card else {
            for field in [
                Field::CardNumber,
                Field::CardHolderName,
                Field::CardExpiry,
                Field::CardCvv,
            ] {
                errors.push(field, FieldError::Required);
            }
            return;
        };

        errors.check(
            Field::CardNumber,
            rules::matches_mask(&card.number, CARD_NUMBER_MASK),
        );
        errors.check(Field::CardHolderName, rules::min_chars(&card.holder_name, 3));
        errors.check(Field::CardExpiry, rules::card_expiry(&card.expiry));
        errors.check(Field::CardCvv, rules::card_cvv(&card.cvv));
    }

    /// Buyer details to store on the order. Card data is never stored.
    pub fn customer(&self, email: &str) -> Customer {
        Customer {
            name: self.name.clone(),
            tax_id: self.tax_id.clone(),
            email: email.to_string(),
            phone: self.phone.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn form(payment_method: PaymentMethod) -> CheckoutForm {
        let card = (payment_method == PaymentMethod::Card).then(|| CardDetails {
            number: "4111 1111 1111 1111".to_string(),
            holder_name: "MARIA SILVA".to_string(),
            expiry: "12/29".to_string(),
            cvv: "123".to_string(),
        });

        CheckoutForm {
            name: "Maria Silva".to_string(),
            tax_id: "123.456.789-01".to_string(),
            phone: "(11) 98765-4321".to_string(),
            payment_method,
            card,
        }
    }
}
