//! Payment endpoints.

use tracing::instrument;

use crate::error::GatewayError;
use crate::models::{PaymentMethod, PaymentReceipt, ProcessPaymentRequest};

use super::Gateway;

impl Gateway {
    /// `POST /payments/process` - submit a payment for an order.
    ///
    /// # Errors
    ///
    /// Default message: `"Payment failed"`.
    #[instrument(skip_all, fields(order_id = %request.order_id, method = %request.method))]
    pub async fn process_payment(
        &self,
        request: &ProcessPaymentRequest,
    ) -> Result<PaymentReceipt, GatewayError> {
        self.post("/payments/process", request, "Payment failed")
            .await
    }

    /// `GET /payments/methods` - available payment methods.
    ///
    /// # Errors
    ///
    /// Default message: `"Failed to fetch payment methods"`.
    pub async fn payment_methods(&self) -> Result<Vec<PaymentMethod>, GatewayError> {
        self.get("/payments/methods", "Failed to fetch payment methods")
            .await
    }
}
