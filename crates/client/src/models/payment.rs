//! Payment payloads.
//!
//! Payment processing is entirely backend-side; the client only submits a
//! request and reads back the receipt.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tavola_core::{OrderId, PaymentId, PaymentStatus};

/// Body of `POST /payments/process`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentRequest {
    pub order_id: OrderId,
    /// One of the method ids from `GET /payments/methods`.
    pub method: String,
    pub amount: Decimal,
}

/// Receipt returned by the backend after processing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub status: PaymentStatus,
    pub amount: Decimal,
}

/// A payment method offered by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    /// Stable identifier sent back in [`ProcessPaymentRequest::method`].
    pub id: String,
    /// Display label, e.g. `"Credit card"`.
    pub name: String,
}
