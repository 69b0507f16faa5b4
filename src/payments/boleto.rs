//! Boleto
//!
//! Fake boleto bank slips. The barcode follows the 44-digit FEBRABAN layout:
//!
//! | Positions | Content                               |
//! |-----------|---------------------------------------|
//! | 1-3       | Bank code (`001`)                     |
//! | 4         | Currency code (`9`, reais)            |
//! | 5         | General check digit (modulo 11)       |
//! | 6-9       | Due-date factor                       |
//! | 10-19     | Amount in cents                       |
//! | 20-44     | Free field (digits of the order id)   |

use jiff::{ToSpan, civil::Date};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

use crate::pricing::plain_amount;

/// Issuing bank code.
pub const BANK_CODE: &str = "001";

/// Currency code for reais.
pub const CURRENCY_CODE: u8 = 9;

/// Name printed as the slip recipient.
pub const RECIPIENT: &str = "Iara Games LTDA";

/// CNPJ printed on the slip.
pub const RECIPIENT_CNPJ: &str = "00.000.000/0001-00";

/// Days between issue and due date.
pub const DUE_IN_DAYS: i32 = 3;

const BARCODE_LEN: usize = 44;
const FREE_FIELD_LEN: usize = 25;
const MAX_AMOUNT_CENTS: u64 = 9_999_999_999;

/// Errors raised while generating a boleto.
#[derive(Debug, Error)]
pub enum BoletoError {
    /// The amount is negative or does not fit the 10-digit amount field.
    #[error("amount {0} cannot be encoded in a boleto")]
    AmountOutOfRange(Decimal),

    /// Due-date arithmetic overflowed.
    #[error("invalid due date")]
    DueDate(#[from] jiff::Error),
}

/// Inputs for [`generate_boleto`].
#[derive(Debug, Clone, Copy)]
pub struct BoletoRequest<'a> {
    /// Amount due.
    pub amount: Decimal,

    /// Order the slip pays for.
    pub order_id: &'a str,

    /// Payer name.
    pub customer_name: &'a str,

    /// Payer CPF.
    pub customer_tax_id: &'a str,

    /// Date the slip is issued; the due date is derived from it.
    pub issued_on: Date,
}

/// A displayable boleto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoletoArtifact {
    /// 44-digit barcode.
    pub barcode: String,

    /// 47-digit digitable line, grouped in five fields.
    pub digitable_line: String,

    /// Recipient name.
    pub recipient: &'static str,

    /// Recipient CNPJ.
    pub cnpj: &'static str,

    /// Amount, e.g. `35.50`.
    pub value: String,

    /// Due date.
    pub due_date: Date,

    /// Order id.
    pub order_id: String,

    /// Payer name.
    pub customer_name: String,

    /// Payer CPF.
    pub customer_tax_id: String,
}

impl BoletoArtifact {
    /// Due date as printed on Brazilian slips, `dd/mm/yyyy`.
    pub fn due_date_display(&self) -> String {
        self.due_date.strftime("%d/%m/%Y").to_string()
    }
}

/// Generate a boleto. Identical requests produce identical slips.
///
/// # Errors
///
/// Returns a [`BoletoError`] when the amount or due date cannot be encoded.
pub fn generate_boleto(request: &BoletoRequest<'_>) -> Result<BoletoArtifact, BoletoError> {
    let due_date = request.issued_on.checked_add(DUE_IN_DAYS.days())?;
    let barcode = barcode(request.amount, request.order_id, due_date)?;
    let digitable_line = digitable_line(&barcode);

    Ok(BoletoArtifact {
        barcode: render(&barcode),
        digitable_line,
        recipient: RECIPIENT,
        cnpj: RECIPIENT_CNPJ,
        value: plain_amount(request.amount),
        due_date,
        order_id: request.order_id.to_string(),
        customer_name: request.customer_name.to_string(),
        customer_tax_id: request.customer_tax_id.to_string(),
    })
}

/// Days since 1997-10-07, restarting at 1000 once 9999 is exceeded.
///
/// # Errors
///
/// Returns an error if the date difference cannot be computed.
pub fn due_date_factor(due_date: Date) -> Result<u16, jiff::Error> {
    let base = Date::new(1997, 10, 7)?;
    let days = i64::from(base.until(due_date)?.get_days());

    let factor = if days <= 9999 {
        days.max(0)
    } else {
        (days - 10_000) % 9000 + 1000
    };

    Ok(u16::try_from(factor).unwrap_or(0))
}

fn barcode(amount: Decimal, order_id: &str, due_date: Date) -> Result<Vec<u8>, BoletoError> {
    let cents = amount_in_cents(amount)?;
    let factor = due_date_factor(due_date)?;

    let mut body: Vec<u8> = Vec::with_capacity(BARCODE_LEN - 1);

    body.extend(BANK_CODE.bytes().map(|b| b - b'0'));
    body.push(CURRENCY_CODE);
    push_padded(&mut body, u64::from(factor), 4);
    push_padded(&mut body, cents, 10);

    let mut free_field: Vec<u8> = order_id
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .take(FREE_FIELD_LEN)
        .collect();

    free_field.resize(FREE_FIELD_LEN, 0);
    body.extend(free_field);

    let check = modulo_11(&body);

    let mut barcode = body;
    barcode.insert(4, check);

    Ok(barcode)
}

fn digitable_line(barcode: &[u8]) -> String {
    let segment = move |start: usize, end: usize| barcode.get(start..end).unwrap_or_default();

    let field_1 = [segment(0, 4), segment(19, 24)].concat();
    let field_2 = segment(24, 34).to_vec();
    let field_3 = segment(34, 44).to_vec();

    let with_check = |mut field: Vec<u8>| {
        let check = modulo_10(&field);
        field.push(check);
        render(&field)
    };

    let field_1 = with_check(field_1);
    let field_2 = with_check(field_2);
    let field_3 = with_check(field_3);
    let general_check = render(segment(4, 5));
    let factor_and_amount = render(segment(5, 19));

    format!(
        "{} {} {} {general_check} {factor_and_amount}",
        group(&field_1, 5),
        group(&field_2, 5),
        group(&field_3, 5),
    )
}

fn amount_in_cents(amount: Decimal) -> Result<u64, BoletoError> {
    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .filter(|cents| *cents <= MAX_AMOUNT_CENTS)
        .ok_or(BoletoError::AmountOutOfRange(amount))
}

fn push_padded(digits: &mut Vec<u8>, value: u64, width: usize) {
    let rendered = format!("{value:0width$}");

    digits.extend(rendered.bytes().map(|b| b - b'0'));
}

/// FEBRABAN general check digit: weights 2..=9 from the right; 0, 10 and 11 become 1.
fn modulo_11(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .zip((2..=9).cycle())
        .map(|(digit, weight)| u32::from(*digit) * weight)
        .sum();

    match 11 - sum % 11 {
        0 | 10 | 11 => 1,
        check => u8::try_from(check).unwrap_or(1),
    }
}

/// Field check digit: weights 2, 1 alternating from the right, products digit-summed.
fn modulo_10(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .zip([2_u32, 1].into_iter().cycle())
        .map(|(digit, weight)| {
            let product = u32::from(*digit) * weight;
            product / 10 + product % 10
        })
        .sum();

    u8::try_from((10 - sum % 10) % 10).unwrap_or(0)
}

fn render(digits: &[u8]) -> String {
    digits.iter().map(|digit| char::from(b'0' + digit)).collect()
}

/// Inserts a dot after the first `head` characters.
fn group(field: &str, head: usize) -> String {
    let mut out = String::with_capacity(field.len() + 1);

    for (idx, ch) in field.chars().enumerate() {
        if idx == head {
            out.push('.');
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;

    use super::*;

    fn request(issued_on: Date) -> BoletoRequest<'static> {
        BoletoRequest {
            amount: dec!(35.50),
            order_id: "ORDER-1718000000123",
            customer_name: "Maria Silva",
            customer_tax_id: "123.456.789-01",
            issued_on,
        }
    }

    #[test]
    fn barcode_layout() -> TestResult {
        let issued_on = Date::new(2024, 6, 10)?;
        let boleto = generate_boleto(&request(issued_on))?;

        assert_eq!(boleto.barcode.len(), 44);
        assert!(boleto.barcode.bytes().all(|b| b.is_ascii_digit()));
        assert!(boleto.barcode.starts_with("0019"));

        // factor(4) + amount(10) + free field(25)
        assert_eq!(
            boleto.barcode.get(5..44),
            Some(
                format!(
                    "{:04}{:010}{:0<25}",
                    due_date_factor(Date::new(2024, 6, 13)?)?,
                    3550,
                    "1718000000123"
                )
                .as_str()
            )
        );

        Ok(())
    }

    #[test]
    fn general_check_digit_is_modulo_11_of_the_rest() -> TestResult {
        let boleto = generate_boleto(&request(Date::new(2024, 6, 10)?))?;

        let digits: Vec<u8> = boleto.barcode.bytes().map(|b| b - b'0').collect();
        let without_check: Vec<u8> = digits
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != 4)
            .map(|(_, digit)| *digit)
            .collect();

        assert_eq!(digits.get(4).copied(), Some(modulo_11(&without_check)));

        Ok(())
    }

    #[test]
    fn modulo_11_known_values() {
        // Worked example: weights 2..=9 over 1..=9 read from the right.
        let digits = [1, 2, 3, 4, 5, 6, 7, 8, 9];

        // 9*2 + 8*3 + 7*4 + 6*5 + 5*6 + 4*7 + 3*8 + 2*9 + 1*2 = 202; 202 % 11 = 4; 11 - 4 = 7
        assert_eq!(modulo_11(&digits), 7);

        // sum % 11 == 0 -> 11 -> 1
        assert_eq!(modulo_11(&[0, 0, 0]), 1);
    }

    #[test]
    fn modulo_10_known_values() {
        // 2 + 0 + 6 + 7 + 6 + 9 + 2 + 0 + 0 = 32 -> 8
        assert_eq!(modulo_10(&[0, 0, 1, 9, 3, 7, 3, 0, 1]), 8);
        assert_eq!(modulo_10(&[0, 0, 0]), 0);

        // 5 * 2 = 10 -> 1 + 0 = 1 -> 9
        assert_eq!(modulo_10(&[5]), 9);
        assert_eq!(modulo_10(&[1]), 8);
        assert_eq!(modulo_10(&[9, 5]), 0);
    }

    #[test]
    fn digitable_line_layout() -> TestResult {
        let boleto = generate_boleto(&request(Date::new(2024, 6, 10)?))?;
        let fields: Vec<&str> = boleto.digitable_line.split(' ').collect();

        assert_eq!(fields.len(), 5);
        assert_eq!(fields.iter().map(|field| field.len()).collect::<Vec<_>>(), [11, 12, 12, 1, 14]);

        let digit_count: usize = fields
            .iter()
            .map(|field| field.bytes().filter(u8::is_ascii_digit).count())
            .sum();

        assert_eq!(digit_count, 47);

        // The last two fields repeat the check digit, factor and amount from the barcode.
        assert_eq!(fields.get(3).copied(), boleto.barcode.get(4..5));
        assert_eq!(fields.get(4).copied(), boleto.barcode.get(5..19));

        Ok(())
    }

    #[test]
    fn identical_inputs_give_identical_slips() -> TestResult {
        let issued_on = Date::new(2024, 6, 10)?;

        let first = generate_boleto(&request(issued_on))?;
        let second = generate_boleto(&request(issued_on))?;

        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn due_date_is_three_days_after_issue() -> TestResult {
        let boleto = generate_boleto(&request(Date::new(2024, 12, 30)?))?;

        assert_eq!(boleto.due_date, Date::new(2025, 1, 2)?);
        assert_eq!(boleto.due_date_display(), "02/01/2025");
        assert_eq!(boleto.value, "35.50");
        assert_eq!(boleto.recipient, RECIPIENT);

        Ok(())
    }

    #[test]
    fn due_date_factor_wraps_after_9999() -> TestResult {
        assert_eq!(due_date_factor(Date::new(1997, 10, 7)?)?, 0);
        assert_eq!(due_date_factor(Date::new(2000, 7, 3)?)?, 1000);
        assert_eq!(due_date_factor(Date::new(2025, 2, 21)?)?, 9999);
        assert_eq!(due_date_factor(Date::new(2025, 2, 22)?)?, 1000);
        assert_eq!(due_date_factor(Date::new(2025, 2, 23)?)?, 1001);

        Ok(())
    }

    #[test]
    fn free_field_is_padded_and_truncated() -> TestResult {
        let issued_on = Date::new(2024, 6, 10)?;
        let long_id = "ORDER-12345678901234567890123456789";

        let short = generate_boleto(&BoletoRequest {
            order_id: "ORDER-7",
            ..request(issued_on)
        })?;
        let long = generate_boleto(&BoletoRequest {
            order_id: long_id,
            ..request(issued_on)
        })?;

        assert_eq!(short.barcode.get(19..44), Some("7000000000000000000000000"));
        assert_eq!(long.barcode.get(19..44), Some("1234567890123456789012345"));

        Ok(())
    }

    #[test]
    fn rejects_unencodable_amounts() -> TestResult {
        let issued_on = Date::new(2024, 6, 10)?;

        let negative = generate_boleto(&BoletoRequest {
            amount: dec!(-1),
            ..request(issued_on)
        });
        let huge = generate_boleto(&BoletoRequest {
            amount: dec!(100000000.00),
            ..request(issued_on)
        });

        assert!(matches!(negative, Err(BoletoError::AmountOutOfRange(_))));
        assert!(matches!(huge, Err(BoletoError::AmountOutOfRange(_))));

        Ok(())
    }
}
