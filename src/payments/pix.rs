//! PIX
//!
//! Simulated PIX charges. The payload is not a BR Code: it is base64 encoded JSON carrying
//! the receiving key, the amount and the order id as transaction id.

use base64::{Engine, engine::general_purpose::STANDARD};
use jiff::Timestamp;
use qrcode::{QrCode, render::svg, types::QrError};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::pricing::plain_amount;

/// Receiving PIX key.
pub const PIX_KEY: &str = "iaragames@pix.com.br";

/// Receiving account holder.
pub const RECIPIENT: &str = "Iara Games LTDA";

/// Receiving account city.
pub const CITY: &str = "São Paulo";

/// Minutes a charge stays payable. Informational only.
pub const EXPIRES_IN_MINUTES: u32 = 30;

/// Minimum edge of the rendered QR code, in pixels.
pub const QR_CODE_SIZE: u32 = 300;

/// Errors raised while generating a PIX charge.
#[derive(Debug, Error)]
pub enum PixError {
    /// The payload could not be encoded as a QR code.
    #[error("failed to render PIX QR code")]
    QrCode(#[from] QrError),

    /// The payload could not be serialized.
    #[error("failed to serialize PIX payload")]
    Serialize(#[from] serde_json::Error),
}

/// Inputs for [`generate_pix`].
#[derive(Debug, Clone, Copy)]
pub struct PixRequest<'a> {
    /// Amount due.
    pub amount: Decimal,

    /// Order the charge pays for.
    pub order_id: &'a str,

    /// Time stamped into the payload.
    pub generated_at: Timestamp,
}

/// A displayable PIX charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixArtifact {
    /// Copy-and-paste payload.
    pub payload: String,

    /// `data:image/svg+xml;base64,...` QR code of the payload.
    pub qr_code: String,

    /// Receiving PIX key.
    pub pix_key: &'static str,

    /// Amount, e.g. `35.50`.
    pub value: String,

    /// Minutes the charge stays payable.
    pub expires_in_minutes: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Payload<'a> {
    pix_key: &'a str,
    recipient: &'a str,
    city: &'a str,
    value: String,
    txid: &'a str,
    timestamp: Timestamp,
}

/// Build the copy-and-paste payload for a charge.
///
/// # Errors
///
/// Returns [`PixError::Serialize`] if the payload cannot be serialized.
pub fn pix_payload(request: &PixRequest<'_>) -> Result<String, PixError> {
    let json = serde_json::to_vec(&Payload {
        pix_key: PIX_KEY,
        recipient: RECIPIENT,
        city: CITY,
        value: plain_amount(request.amount),
        txid: request.order_id,
        timestamp: request.generated_at,
    })?;

    Ok(STANDARD.encode(json))
}

/// Render a payload as an SVG QR code wrapped in a data URL.
///
/// # Errors
///
/// Returns [`PixError::QrCode`] if the payload does not fit in a QR code.
pub fn render_qr_code(payload: &str) -> Result<String, PixError> {
    let code = QrCode::new(payload.as_bytes())?;

    let image = code
        .render::<svg::Color<'_>>()
        .min_dimensions(QR_CODE_SIZE, QR_CODE_SIZE)
        .quiet_zone(true)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();

    Ok(format!("data:image/svg+xml;base64,{}", STANDARD.encode(image)))
}

/// Generate a PIX charge.
///
/// # Errors
///
/// Returns a [`PixError`] when the payload cannot be built or rendered.
pub fn generate_pix(request: &PixRequest<'_>) -> Result<PixArtifact, PixError> {
    let payload = pix_payload(request)?;
    let qr_code = render_qr_code(&payload)?;

    Ok(PixArtifact {
        payload,
        qr_code,
        pix_key: PIX_KEY,
        value: plain_amount(request.amount),
        expires_in_minutes: EXPIRES_IN_MINUTES,
    })
}
