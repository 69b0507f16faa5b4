//! Checkout state.

use crate::orders::{Order, OrderId};

/// Where a checkout stands.
///
/// A failed submission returns to [`CheckoutState::Editing`] with the error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// The form is being filled in.
    Editing {
        /// Message from the last failed submission.
        error: Option<String>,
    },

    /// A submission is running.
    Submitting,

    /// A card order was paid and recorded.
    Completed {
        /// The recorded order.
        order_id: OrderId,
    },

    /// A PIX or boleto order waits for the customer to pay.
    AwaitingAsyncPayment {
        /// The pending order.
        order_id: OrderId,
    },
}

impl Default for CheckoutState {
    fn default() -> Self {
        Self::Editing { error: None }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Paid by card and added to the history.
    Completed(Order),

    /// Stored as the pending order.
    AwaitingPayment(Order),
}

impl CheckoutOutcome {
    /// The order placed by the submission.
    pub fn order(&self) -> &Order {
        match self {
            Self::Completed(order) | Self::AwaitingPayment(order) => order,
        }
    }

    pub(crate) fn state(&self) -> CheckoutState {
        match self {
            Self::Completed(order) => CheckoutState::Completed {
                order_id: order.id.clone(),
            },
            Self::AwaitingPayment(order) => CheckoutState::AwaitingAsyncPayment {
                order_id: order.id.clone(),
            },
        }
    }
}
