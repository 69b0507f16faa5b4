//! Checkout errors.

use thiserror::Error;

use crate::{
    cart::CartError, orders::OrderStoreError, payments::PaymentError, session::SessionError,
    validation::ValidationErrors,
};

/// A card payment was not accepted.
#[derive(Debug, Error)]
pub enum SettlementError {
    /// The card was refused.
    #[error("card payment declined: {0}")]
    Declined(String),
}

/// Errors raised by the [`CheckoutOrchestrator`](super::CheckoutOrchestrator).
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The form or cart is invalid. Nothing was written.
    #[error("invalid checkout: {0}")]
    Validation(ValidationErrors),

    /// There is no pending order to confirm.
    #[error("no pending order")]
    NoPendingOrder,

    /// The cart could not be read or cleared.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The pending slot or history could not be read or written.
    #[error(transparent)]
    Orders(#[from] OrderStoreError),

    /// The signed-in email could not be read.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The card payment failed.
    #[error(transparent)]
    Settlement(#[from] SettlementError),

    /// A payment artifact could not be generated.
    #[error(transparent)]
    Payment(#[from] PaymentError),
}
