//! Input masks
//!
//! Progressive formatting for form fields as the user types. Non-digits are stripped first;
//! separators are inserted only once a digit follows them. Input with more digits than the
//! mask holds is returned unchanged.

/// Format a CPF as `000.000.000-00`.
pub fn format_cpf(value: &str) -> String {
    masked(value, 11, "", &[(3, "."), (6, "."), (9, "-")])
}

/// Format a mobile phone number as `(00) 00000-0000`.
pub fn format_phone(value: &str) -> String {
    masked(value, 11, "(", &[(2, ") "), (7, "-")])
}

/// Format a postal code as `00000-000`.
pub fn format_cep(value: &str) -> String {
    masked(value, 8, "", &[(5, "-")])
}

/// Format a card number as `0000 0000 0000 0000`.
pub fn format_card_number(value: &str) -> String {
    masked(value, 16, "", &[(4, " "), (8, " "), (12, " ")])
}

/// Format a card expiry as `MM/YY`.
pub fn format_card_expiry(value: &str) -> String {
    masked(value, 4, "", &[(2, "/")])
}

/// Digits of `value`, in order.
pub fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// `prefix` is emitted together with the first separator.
fn masked(value: &str, max_digits: usize, prefix: &str, separators: &[(usize, &str)]) -> String {
    let digits = digits(value);

    if digits.len() > max_digits {
        return value.to_string();
    }

    let mut out = String::with_capacity(max_digits * 2);

    if separators
        .first()
        .is_some_and(|(position, _)| digits.len() > *position)
    {
        out.push_str(prefix);
    }

    for (idx, digit) in digits.chars().enumerate() {
        if let Some((_, separator)) = separators.iter().find(|(position, _)| *position == idx) {
            out.push_str(separator);
        }
        out.push(digit);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_is_formatted_progressively() {
        assert_eq!(format_cpf("123"), "123");
        assert_eq!(format_cpf("1234"), "123.4");
        assert_eq!(format_cpf("1234567"), "123.456.7");
        assert_eq!(format_cpf("1234567890"), "123.456.789-0");
        assert_eq!(format_cpf("12345678901"), "123.456.789-01");
        assert_eq!(format_cpf("123.456.789-01"), "123.456.789-01");
    }

    #[test]
    fn phone_gets_area_code_parentheses() {
        assert_eq!(format_phone("11"), "11");
        assert_eq!(format_phone("119"), "(11) 9");
        assert_eq!(format_phone("1198765"), "(11) 98765");
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
    }

    #[test]
    fn cep_card_and_expiry() {
        assert_eq!(format_cep("01310100"), "01310-100");
        assert_eq!(format_cep("01310"), "01310");
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("41111"), "4111 1");
        assert_eq!(format_card_expiry("1229"), "12/29");
        assert_eq!(format_card_expiry("1"), "1");
    }

    #[test]
    fn too_many_digits_are_left_untouched() {
        assert_eq!(format_cep("013101001"), "013101001");
        assert_eq!(format_card_expiry("12/299"), "12/299");
    }
}
