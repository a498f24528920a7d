use serde::{Deserialize, Serialize};

use crate::seva_api::validation::AmountInput;

/// A request to open a payment order. The amount is in major units.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewOrderRequest {
    pub amount: Option<AmountInput>,
    pub currency: Option<String>,
}

impl NewOrderRequest {
    pub fn new<A: Into<AmountInput>>(amount: A) -> Self {
        Self { amount: Some(amount.into()), currency: None }
    }

    pub fn with_currency<S: Into<String>>(mut self, currency: S) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

/// The gateway's order object, untouched. Clients use it to open the checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAcknowledgement {
    pub order: serde_json::Value,
}
