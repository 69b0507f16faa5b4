//! Prices

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso};

use crate::items::CartItem;

/// Calculates the total price of a list of items.
///
/// An empty list totals zero. No taxes or discounts are applied.
pub fn total_price(items: &[CartItem]) -> Decimal {
    items.iter().map(CartItem::price).sum()
}

/// Rounds an amount to cents, half away from zero.
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with two decimal places and a dot separator, e.g. `35.50`.
pub fn plain_amount(amount: Decimal) -> String {
    format!("{:.2}", round_to_cents(amount))
}

/// Wraps an amount as Brazilian reals for display.
pub fn brl(amount: Decimal) -> Money<'static, iso::Currency> {
    Money::from_decimal(round_to_cents(amount), iso::BRL)
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_total_price() {
        let items = [
            CartItem::new(1, "A", dec!(10.00)),
            CartItem::new(2, "B", dec!(25.50)),
        ];

        assert_eq!(total_price(&items), dec!(35.50));
    }

    #[test]
    fn test_total_price_empty() {
        assert_eq!(total_price(&[]), Decimal::ZERO);
    }

    #[test]
    fn plain_amount_pads_cents() {
        assert_eq!(plain_amount(dec!(35.5)), "35.50");
        assert_eq!(plain_amount(dec!(59)), "59.00");
        assert_eq!(plain_amount(dec!(0.125)), "0.13");
    }
}
