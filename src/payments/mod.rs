//! Payments
//!
//! Display artifacts for the asynchronous payment methods. Generation is pure: every input,
//! including the current time, is passed in, and nothing is persisted.

use jiff::{Timestamp, civil::Date};
use thiserror::Error;

use crate::orders::{Order, PaymentMethod};

pub mod boleto;
pub mod pix;

pub use boleto::{BoletoArtifact, BoletoError, BoletoRequest, generate_boleto};
pub use pix::{PixArtifact, PixError, PixRequest, generate_pix};

/// Errors raised while generating a payment artifact.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// PIX generation failed.
    #[error(transparent)]
    Pix(#[from] PixError),

    /// Boleto generation failed.
    #[error(transparent)]
    Boleto(#[from] BoletoError),
}

/// What the customer needs to complete an asynchronous payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentArtifact {
    /// QR code and copy-and-paste payload.
    Pix(PixArtifact),

    /// Bank slip.
    Boleto(BoletoArtifact),
}

impl PaymentArtifact {
    /// Generate the artifact for an unpaid PIX or boleto order.
    ///
    /// Returns `None` for card orders and for orders already paid.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentError`] when generation fails.
    pub fn for_order(
        order: &Order,
        generated_at: Timestamp,
        issued_on: Date,
    ) -> Result<Option<Self>, PaymentError> {
        if order.is_paid() {
            return Ok(None);
        }

        let artifact = match order.payment_method {
            PaymentMethod::Card => return Ok(None),
            PaymentMethod::Pix => Self::Pix(generate_pix(&PixRequest {
                amount: order.total,
                order_id: order.id.as_str(),
                generated_at,
            })?),
            PaymentMethod::Boleto => Self::Boleto(generate_boleto(&BoletoRequest {
                amount: order.total,
                order_id: order.id.as_str(),
                customer_name: &order.customer.name,
                customer_tax_id: &order.customer.tax_id,
                issued_on,
            })?),
        };

        Ok(Some(artifact))
    }
}
