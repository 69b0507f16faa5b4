//! Iara
//!
//! Iara is the storefront core of Iara Games: a one-unit-per-title cart, order history,
//! checkout with card, PIX and boleto payments, and the fake payment artifacts those
//! methods display. All state goes through a [`storage::Storage`] implementation.

pub mod address;
pub mod cart;
pub mod checkout;
pub mod clock;
pub mod items;
pub mod masks;
pub mod orders;
pub mod payments;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod session;
pub mod storage;
pub mod validation;
