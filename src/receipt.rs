//! Receipt
//!
//! Plain-text tables for the cart and for placed orders.

use std::io;

use jiff::tz::TimeZone;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    items::CartItem,
    orders::Order,
    pricing::{brl, total_price},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The output could not be written.
    #[error("failed to write receipt")]
    Io(#[from] io::Error),
}

/// Write the cart contents and total.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the output cannot be written.
pub fn write_cart(mut out: impl io::Write, items: &[CartItem]) -> Result<(), ReceiptError> {
    if items.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }

    write_items_table(&mut out, items)?;
    write_total_line(&mut out, &format_total(items))?;

    Ok(())
}

/// Write an order header, its items and its total. Dates are shown in `tz`.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the output cannot be written.
pub fn write_order(
    mut out: impl io::Write,
    order: &Order,
    tz: &TimeZone,
) -> Result<(), ReceiptError> {
    let placed = order.date.to_zoned(tz.clone()).strftime("%d/%m/%Y %H:%M");
    let status = if order.is_paid() { "paid" } else { "awaiting payment" };

    writeln!(out, "Order {}", order.id)?;
    writeln!(out, "  Placed:   {placed}")?;
    writeln!(out, "  Payment:  {} ({status})", order.payment_method.label())?;
    writeln!(
        out,
        "  Customer: {} <{}>",
        order.customer.name, order.customer.email
    )?;

    write_items_table(&mut out, &order.items)?;
    write_total_line(&mut out, &brl(order.total).to_string())?;

    Ok(())
}

fn format_total(items: &[CartItem]) -> String {
    brl(total_price(items)).to_string()
}

fn write_items_table(out: &mut impl io::Write, items: &[CartItem]) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["", "Title", "Price"]);

    for (idx, item) in items.iter().enumerate() {
        builder.push_record([
            format!("#{}", idx + 1),
            item.name.clone(),
            brl(item.price).to_string(),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::last(), Alignment::right());

    writeln!(out, "\n{table}")?;

    Ok(())
}

fn write_total_line(out: &mut impl io::Write, total: &str) -> Result<(), ReceiptError> {
    writeln!(out, " \x1b[1mTotal:\x1b[0m  {total}\n")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::dec;
    use testresult::TestResult;

    use crate::orders::{PaymentMethod, fixtures::order};

    use super::*;

    #[test]
    fn cart_lists_items_and_total() -> TestResult {
        let mut out = Vec::new();

        write_cart(
            &mut out,
            &[
                CartItem::new(1, "Hades", dec!(10.00)),
                CartItem::new(2, "Celeste", dec!(25.50)),
            ],
        )?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Hades"), "missing first title in {text}");
        assert!(text.contains("Celeste"), "missing second title in {text}");
        assert!(text.contains("35,50"), "missing total in {text}");

        Ok(())
    }

    #[test]
    fn empty_cart_has_no_table() -> TestResult {
        let mut out = Vec::new();

        write_cart(&mut out, &[])?;

        assert_eq!(String::from_utf8(out)?, "Cart is empty\n");

        Ok(())
    }

    #[test]
    fn order_shows_method_and_status() -> TestResult {
        let mut out = Vec::new();
        let order = order("ORDER-42", PaymentMethod::Pix, Timestamp::UNIX_EPOCH);

        write_order(&mut out, &order, &TimeZone::UTC)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Order ORDER-42"), "missing id in {text}");
        assert!(text.contains("01/01/1970 00:00"), "missing date in {text}");
        assert!(text.contains("PIX (awaiting payment)"), "missing status in {text}");
        assert!(text.contains("maria@example.com"), "missing email in {text}");

        Ok(())
    }
}
