use thiserror::Error;

use crate::traits::{GatewayOrderRequest, GatewayPayment};

#[derive(Debug, Clone, Error)]
pub enum PaymentGatewayError {
    #[error("The payment gateway rejected the request: {0}")]
    Rejected(String),
    #[error("Could not reach the payment gateway: {0}")]
    Unavailable(String),
    #[error("Payment {0} is not known to the payment gateway")]
    PaymentNotFound(String),
}

/// A third-party payment provider.
///
/// The engine never retries gateway calls and bounds each one with its own timeout, so implementations need not
/// do either.
#[allow(async_fn_in_trait)]
pub trait PaymentGateway {
    /// Creates a payment order with the provider. The provider's order object is returned as-is, since the client
    /// needs it to open the checkout.
    async fn create_order(&self, request: GatewayOrderRequest) -> Result<serde_json::Value, PaymentGatewayError>;

    /// Fetches the provider's record of a payment.
    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, PaymentGatewayError>;

    /// Checks the signature the provider's checkout hands to the client alongside a successful payment.
    fn verify_checkout_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;
}
