//! Orders

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{items::CartItem, pricing::total_price};

mod errors;
mod store;

pub use errors::OrderStoreError;
pub use store::{OrderStore, OrderSummary};

/// Time-based order identifier, e.g. `ORDER-1718000000000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Prefix shared by every generated id.
    pub const PREFIX: &'static str = "ORDER-";

    /// Builds the id for an order created at `at`.
    pub fn from_timestamp(at: Timestamp) -> Self {
        Self(format!("{}{}", Self::PREFIX, at.as_millisecond()))
    }

    /// The id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Credit card, settled immediately.
    Card,

    /// PIX instant transfer, confirmed by the customer.
    Pix,

    /// Boleto bank slip, confirmed by the customer.
    Boleto,
}

impl PaymentMethod {
    /// Whether the order waits in the pending slot until the customer confirms payment.
    pub fn is_async(self) -> bool {
        matches!(self, Self::Pix | Self::Boleto)
    }

    /// Customer-facing name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Card => "Cartão de Crédito",
            Self::Pix => "PIX",
            Self::Boleto => "Boleto Bancário",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Card => "card",
            Self::Pix => "pix",
            Self::Boleto => "boleto",
        })
    }
}

/// Buyer details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Full name.
    pub name: String,

    /// CPF, formatted `000.000.000-00`.
    #[serde(rename = "cpf")]
    pub tax_id: String,

    /// Contact email.
    pub email: String,

    /// Phone, formatted `(00) 00000-0000`.
    pub phone: String,
}

/// A placed order.
///
/// Items are snapshots: later catalog or cart changes never alter a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id.
    pub id: OrderId,

    /// Purchased items.
    pub items: Vec<CartItem>,

    /// Sum of item prices at creation.
    pub total: Decimal,

    /// Buyer details.
    pub customer: Customer,

    /// Chosen payment method.
    pub payment_method: PaymentMethod,

    /// Creation time.
    pub date: Timestamp,

    /// Set once a boleto payment is confirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boleto_paid: Option<bool>,

    /// Set once a PIX payment is confirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix_paid: Option<bool>,
}

impl Order {
    /// Creates an order from a cart snapshot, totalling the item prices.
    pub fn new(
        id: OrderId,
        items: Vec<CartItem>,
        customer: Customer,
        payment_method: PaymentMethod,
        date: Timestamp,
    ) -> Self {
        let total = total_price(&items);

        Self {
            id,
            items,
            total,
            customer,
            payment_method,
            date,
            boleto_paid: None,
            pix_paid: None,
        }
    }

    /// Whether payment has completed. Card orders are paid on placement.
    pub fn is_paid(&self) -> bool {
        match self.payment_method {
            PaymentMethod::Card => true,
            PaymentMethod::Pix => self.pix_paid == Some(true),
            PaymentMethod::Boleto => self.boleto_paid == Some(true),
        }
    }

    /// Record a customer-asserted payment for an asynchronous method.
    ///
    /// Has no effect on card orders.
    pub fn mark_paid(&mut self) {
        match self.payment_method {
            PaymentMethod::Card => {}
            PaymentMethod::Pix => self.pix_paid = Some(true),
            PaymentMethod::Boleto => self.boleto_paid = Some(true),
        }
    }
}
