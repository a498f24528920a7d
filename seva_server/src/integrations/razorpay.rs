use log::*;
use provider_tools::{
    razorpay::{NewRazorpayOrder, RazorpayApi, RazorpayPayment},
    ProviderApiError,
};
use seva_common::Paise;
use seva_engine::traits::{GatewayOrderRequest, GatewayPayment, GatewayPaymentStatus, PaymentGateway, PaymentGatewayError};

/// Razorpay as the engine's payment gateway.
#[derive(Clone)]
pub struct RazorpayGateway {
    api: RazorpayApi,
}

impl RazorpayGateway {
    pub fn new(api: RazorpayApi) -> Self {
        Self { api }
    }
}

impl PaymentGateway for RazorpayGateway {
    async fn create_order(&self, request: GatewayOrderRequest) -> Result<serde_json::Value, PaymentGatewayError> {
        let order = NewRazorpayOrder {
            amount: request.amount.value(),
            currency: request.currency,
            receipt: request.receipt,
            notes: Default::default(),
        };
        self.api.create_order(&order).await.map_err(|e| {
            warn!("💳️ Razorpay did not create order {}. {e}", order.receipt);
            order_error(e)
        })
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, PaymentGatewayError> {
        let payment = self.api.fetch_payment(payment_id).await.map_err(|e| payment_error(e, payment_id))?;
        Ok(gateway_payment(payment))
    }

    fn verify_checkout_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        self.api.verify_checkout_signature(order_id, payment_id, signature)
    }
}

fn is_outage(e: &ProviderApiError) -> bool {
    e.is_transport_error() || e.status().is_some_and(|s| s >= 500)
}

fn order_error(e: ProviderApiError) -> PaymentGatewayError {
    if is_outage(&e) {
        PaymentGatewayError::Unavailable(e.to_string())
    } else {
        PaymentGatewayError::Rejected(e.to_string())
    }
}

fn payment_error(e: ProviderApiError, payment_id: &str) -> PaymentGatewayError {
    match e.status() {
        // Razorpay answers 400 BAD_REQUEST_ERROR for ids it does not know
        Some(400) | Some(404) => PaymentGatewayError::PaymentNotFound(payment_id.to_string()),
        _ if is_outage(&e) => PaymentGatewayError::Unavailable(e.to_string()),
        _ => PaymentGatewayError::Rejected(e.to_string()),
    }
}

fn gateway_payment(payment: RazorpayPayment) -> GatewayPayment {
    GatewayPayment {
        status: GatewayPaymentStatus::from(payment.status.as_str()),
        payment_id: payment.id,
        amount: Paise::from(payment.amount),
        currency: payment.currency,
        order_id: payment.order_id,
    }
}
