use std::{fmt::Debug, time::Duration};

use log::*;
use seva_common::DEFAULT_CURRENCY_CODE;
use tokio::time::timeout;

use crate::{
    helpers::new_receipt_id,
    seva_api::{
        errors::OrderError,
        order_objects::{NewOrderRequest, OrderAcknowledgement},
    },
    traits::{GatewayOrderRequest, PaymentGateway},
};

pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(15);

/// `OrderApi` opens payment orders with the payment gateway, ahead of the donor's checkout.
///
/// Nothing is stored locally. Each call creates a new order at the gateway, and failed calls are not retried.
pub struct OrderApi<G> {
    gateway: G,
    gateway_timeout: Duration,
    default_currency: String,
}

impl<G> Debug for OrderApi<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderApi ({}, timeout {:?})", self.default_currency, self.gateway_timeout)
    }
}

impl<G> OrderApi<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway, gateway_timeout: DEFAULT_GATEWAY_TIMEOUT, default_currency: DEFAULT_CURRENCY_CODE.to_string() }
    }

    pub fn with_timeout(mut self, gateway_timeout: Duration) -> Self {
        self.gateway_timeout = gateway_timeout;
        self
    }

    pub fn with_default_currency<S: Into<String>>(mut self, currency: S) -> Self {
        self.default_currency = currency.into();
        self
    }
}

impl<G> OrderApi<G>
where G: PaymentGateway
{
    /// Creates a payment order for `request.amount` (major units) with the gateway.
    ///
    /// The amount is converted to paise before it is sent. The currency defaults to the configured default currency.
    /// The gateway's order object is handed back verbatim.
    pub async fn create_order(&self, request: NewOrderRequest) -> Result<OrderAcknowledgement, OrderError> {
        let amount = match &request.amount {
            Some(amount) => amount.to_positive_paise().map_err(OrderError::InvalidAmount)?,
            None => return Err(OrderError::InvalidAmount("amount is required".into())),
        };
        let currency = match request.currency.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) => normalize_currency(c)?,
            None => normalize_currency(&self.default_currency)?,
        };
        let receipt = new_receipt_id();
        debug!("🔄️🧾️ Requesting a {currency} payment order for {amount} with receipt {receipt}");
        let order_request = GatewayOrderRequest { amount, currency, receipt };
        let order = match timeout(self.gateway_timeout, self.gateway.create_order(order_request)).await {
            Ok(Ok(order)) => order,
            Ok(Err(e)) => {
                warn!("🔄️🧾️ The payment gateway could not create an order. {e}");
                return Err(OrderError::OrderCreationFailed(e.to_string()));
            },
            Err(_) => {
                warn!("🔄️🧾️ The payment gateway did not respond within {:?}", self.gateway_timeout);
                let msg = format!("The payment gateway did not respond within {}s", self.gateway_timeout.as_secs_f32());
                return Err(OrderError::OrderCreationFailed(msg));
            },
        };
        trace!("🔄️🧾️ Payment order created: {order}");
        Ok(OrderAcknowledgement { order })
    }
}

fn normalize_currency(code: &str) -> Result<String, OrderError> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(OrderError::InvalidCurrency(code.to_string()))
    }
}
