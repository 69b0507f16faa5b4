//! Registration form.

use crate::{
    address::{AddressFields, StoredAddress},
    validation::{
        Field, ValidationErrors,
        rules::{self, CEP_MASK},
    },
};

/// Account sign-up with a delivery address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Account email.
    pub email: String,

    /// Password, at least 6 characters.
    pub password: String,

    /// Must equal `password`.
    pub confirm_password: String,

    /// Postal code, `00000-000`.
    pub cep: String,

    /// Street.
    pub address: String,

    /// House number.
    pub number: String,

    /// Optional complement.
    pub complement: String,

    /// Neighborhood.
    pub neighborhood: String,

    /// City.
    pub city: String,

    /// Two-letter state code.
    pub state: String,
}

impl RegistrationForm {
    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check(Field::Email, rules::email(&self.email));
        errors.check(Field::Password, rules::min_chars(&self.password, 6));
        errors.check(
            Field::ConfirmPassword,
            rules::required(&self.confirm_password).and_then(|()| {
                if self.confirm_password == self.password {
                    Ok(())
                } else {
                    Err(super::FieldError::Mismatch)
                }
            }),
        );
        errors.check(Field::PostalCode, rules::matches_mask(&self.cep, CEP_MASK));
        errors.check(Field::Address, rules::min_chars(&self.address, 3));
        errors.check(Field::Number, rules::required(&self.number));
        errors.check(Field::Neighborhood, rules::required(&self.neighborhood));
        errors.check(Field::City, rules::required(&self.city));
        errors.check(Field::State, rules::letters(&self.state, 2));

        errors.into_result()
    }

    /// Fill street, neighborhood, city and state from a postal-code lookup.
    ///
    /// Number and complement are left as typed.
    pub fn autofill(&mut self, fields: &AddressFields) {
        self.address.clone_from(&fields.street);
        self.neighborhood.clone_from(&fields.neighborhood);
        self.city.clone_from(&fields.city);
        self.state.clone_from(&fields.state);
    }

    /// The address to persist once the account exists.
    pub fn to_stored_address(&self) -> StoredAddress {
        StoredAddress {
            cep: self.cep.clone(),
            address: self.address.clone(),
            number: self.number.clone(),
            complement: self.complement.clone(),
            neighborhood: self.neighborhood.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::validation::FieldError;

    use super::*;

    fn form() -> RegistrationForm {
        RegistrationForm {
            email: "eve.holt@reqres.in".to_string(),
            password: "cityslicka".to_string(),
            confirm_password: "cityslicka".to_string(),
            cep: "01001-000".to_string(),
            address: "Praça da Sé".to_string(),
            number: "100".to_string(),
            complement: String::new(),
            neighborhood: "Sé".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert_eq!(form().validate(), Ok(()));
    }

    #[test]
    fn reports_every_failing_field() {
        let form = RegistrationForm {
            password: "123".to_string(),
            confirm_password: "1234".to_string(),
            cep: "01001000".to_string(),
            state: "São".to_string(),
            ..form()
        };

        let Err(errors) = form.validate() else {
            panic!("expected validation errors");
        };

        assert_eq!(errors.get(Field::Password), Some(&FieldError::TooShort(6)));
        assert_eq!(errors.get(Field::ConfirmPassword), Some(&FieldError::Mismatch));
        assert_eq!(errors.get(Field::PostalCode), Some(&FieldError::Format(CEP_MASK)));
        assert_eq!(errors.get(Field::State), Some(&FieldError::WrongLength(2)));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn autofill_keeps_number_and_complement() {
        let mut form = RegistrationForm {
            address: String::new(),
            complement: "apto 12".to_string(),
            ..form()
        };

        form.autofill(&AddressFields {
            street: "Avenida Paulista".to_string(),
            complement: "de 612 a 1510 - lado par".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
        });

        assert_eq!(form.address, "Avenida Paulista");
        assert_eq!(form.neighborhood, "Bela Vista");
        assert_eq!(form.number, "100");
        assert_eq!(form.complement, "apto 12");
    }

    #[test]
    fn stored_address_copies_the_form() {
        let stored = form().to_stored_address();

        assert_eq!(stored.cep, "01001-000");
        assert_eq!(stored.address, "Praça da Sé");
        assert_eq!(stored.state, "SP");
    }
}
