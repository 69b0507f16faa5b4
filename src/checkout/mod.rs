//! Checkout
//!
//! Turns the cart and a submitted form into an order. Card orders settle immediately and go
//! straight to the history; PIX and boleto orders wait in the pending slot until the customer
//! confirms payment.
//!
//! The order is always committed before the cart is cleared. When clearing fails, the commit
//! is rolled back so the cart and the stored orders never both hold the purchase.

use std::sync::Arc;

use jiff::tz::TimeZone;
use tracing::{error, info, warn};

use crate::{
    cart::CartManager,
    clock::Clock,
    orders::{Order, OrderId, OrderStore, PaymentMethod},
    payments::PaymentArtifact,
    session::SessionStore,
    storage::Storage,
    validation::{Field, FieldError, ValidationErrors},
};

mod errors;
mod form;
mod state;

pub use errors::{CheckoutError, SettlementError};
pub use form::{CardDetails, CheckoutForm};
pub use state::{CheckoutOutcome, CheckoutState};

/// Email recorded on orders placed without a signed-in user.
pub const FALLBACK_EMAIL: &str = "usuario@iaragames.com";

/// Settles card payments.
pub trait CardSettlement: Send + Sync {
    /// Charge the card for `order`.
    ///
    /// # Errors
    ///
    /// Returns a [`SettlementError`] when the payment is refused.
    async fn settle(&self, order: &Order) -> Result<(), SettlementError>;
}

/// Accepts every card payment at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSettlement;

impl CardSettlement for InstantSettlement {
    async fn settle(&self, _order: &Order) -> Result<(), SettlementError> {
        Ok(())
    }
}

/// Checkout Orchestrator
#[derive(Debug)]
pub struct CheckoutOrchestrator<C, S> {
    orders: OrderStore,
    session: SessionStore,
    clock: C,
    settlement: S,
    state: CheckoutState,
}

impl<C: Clock, S: CardSettlement> CheckoutOrchestrator<C, S> {
    /// Create an orchestrator over the given storage.
    pub fn new(storage: Arc<dyn Storage>, clock: C, settlement: S) -> Self {
        Self {
            orders: OrderStore::new(storage.clone()),
            session: SessionStore::new(storage),
            clock,
            settlement,
            state: CheckoutState::default(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// The order store this orchestrator writes to.
    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }

    /// Submit the form, placing an order for everything in the cart.
    ///
    /// On failure the state returns to [`CheckoutState::Editing`] carrying the error message.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Validation`] for an invalid form or empty cart, before
    /// anything is written. Other errors mean the order was not placed and the cart is intact.
    pub async fn submit(
        &mut self,
        cart: &mut CartManager,
        form: &CheckoutForm,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let result = self.place_order(cart, form).await;

        self.state = match &result {
            Ok(outcome) => outcome.state(),
            Err(err) => {
                warn!(error = %err, "checkout failed");

                CheckoutState::Editing {
                    error: Some(err.to_string()),
                }
            }
        };

        result
    }

    async fn place_order(
        &mut self,
        cart: &mut CartManager,
        form: &CheckoutForm,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let mut errors = ValidationErrors::new();

        if cart.is_empty() {
            errors.push(Field::Cart, FieldError::Empty);
        }

        form.collect_errors(&mut errors);
        errors.into_result().map_err(CheckoutError::Validation)?;

        self.state = CheckoutState::Submitting;

        let now = self.clock.now();
        let email = self
            .session
            .email()?
            .unwrap_or_else(|| FALLBACK_EMAIL.to_string());

        let order = Order::new(
            OrderId::from_timestamp(now),
            cart.items().to_vec(),
            form.customer(&email),
            form.payment_method,
            now,
        );

        info!(
            order_id = %order.id,
            method = %order.payment_method,
            total = %order.total,
            items = order.items.len(),
            "submitting order"
        );

        match order.payment_method {
            PaymentMethod::Card => {
                self.settlement.settle(&order).await?;
                self.commit_card_order(cart, order)
            }
            PaymentMethod::Pix | PaymentMethod::Boleto => self.commit_pending_order(cart, order),
        }
    }

    fn commit_card_order(
        &self,
        cart: &mut CartManager,
        order: Order,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        self.orders.append(order.clone())?;

        if let Err(err) = cart.clear() {
            if let Err(rollback) = self.orders.pop_last() {
                error!(order_id = %order.id, error = %rollback, "failed to roll back order history");
            }

            return Err(err.into());
        }

        info!(order_id = %order.id, "order completed");

        Ok(CheckoutOutcome::Completed(order))
    }

    fn commit_pending_order(
        &self,
        cart: &mut CartManager,
        order: Order,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let previous = self.orders.pending()?;

        if let Some(previous) = &previous {
            warn!(
                replaced = %previous.id,
                order_id = %order.id,
                "replacing unconfirmed pending order"
            );
        }

        self.orders.set_pending(&order)?;

        if let Err(err) = cart.clear() {
            let rollback = match &previous {
                Some(previous) => self.orders.set_pending(previous),
                None => self.orders.clear_pending(),
            };

            if let Err(rollback) = rollback {
                error!(order_id = %order.id, error = %rollback, "failed to roll back pending order");
            }

            return Err(err.into());
        }

        info!(order_id = %order.id, "order awaiting payment");

        Ok(CheckoutOutcome::AwaitingPayment(order))
    }

    /// Record the customer's claim that the pending order has been paid.
    ///
    /// The paid order moves from the pending slot to the history.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NoPendingOrder`] when nothing is pending.
    pub fn confirm_payment(&mut self) -> Result<Order, CheckoutError> {
        let mut order = self
            .orders
            .pending()?
            .ok_or(CheckoutError::NoPendingOrder)?;

        order.mark_paid();

        self.orders.append(order.clone())?;

        if let Err(err) = self.orders.clear_pending() {
            if let Err(rollback) = self.orders.pop_last() {
                error!(order_id = %order.id, error = %rollback, "failed to roll back order history");
            }

            return Err(err.into());
        }

        info!(order_id = %order.id, method = %order.payment_method, "payment confirmed");

        self.state = CheckoutState::Completed {
            order_id: order.id.clone(),
        };

        Ok(order)
    }

    /// The PIX charge or boleto for an unpaid order, generated now.
    ///
    /// Returns `None` for card orders and paid orders.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Payment`] when generation fails.
    pub fn payment_artifact(&self, order: &Order) -> Result<Option<PaymentArtifact>, CheckoutError> {
        let now = self.clock.now();
        let issued_on = now.to_zoned(TimeZone::system()).date();

        Ok(PaymentArtifact::for_order(order, now, issued_on)?)
    }
}
