use std::fmt::Display;

use serde::{Deserialize, Serialize};
use seva_common::Paise;

/// An order creation request as sent to the payment gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOrderRequest {
    /// The order amount. Providers expect minor units.
    pub amount: Paise,
    /// Upper-case ISO 4217 currency code
    pub currency: String,
    /// Our reference for the order
    pub receipt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayPaymentStatus {
    Created,
    Authorized,
    Captured,
    Refunded,
    Failed,
    Other(String),
}

impl GatewayPaymentStatus {
    /// Whether the payer's money has been secured, i.e. the payment can back a donation.
    pub fn is_settled(&self) -> bool {
        matches!(self, GatewayPaymentStatus::Authorized | GatewayPaymentStatus::Captured)
    }
}

impl From<&str> for GatewayPaymentStatus {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "created" => Self::Created,
            "authorized" => Self::Authorized,
            "captured" => Self::Captured,
            "refunded" => Self::Refunded,
            "failed" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Display for GatewayPaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Authorized => write!(f, "authorized"),
            Self::Captured => write!(f, "captured"),
            Self::Refunded => write!(f, "refunded"),
            Self::Failed => write!(f, "failed"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// The gateway's view of a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayPayment {
    pub payment_id: String,
    pub amount: Paise,
    pub currency: String,
    pub status: GatewayPaymentStatus,
    pub order_id: Option<String>,
}
