use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Body of `POST /v1/orders`. Amounts are in the currency's minor unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRazorpayOrder {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub notes: HashMap<String, String>,
}

/// The fields of a Razorpay payment entity that the backend cares about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RazorpayPayment {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    /// One of `created`, `authorized`, `captured`, `refunded` or `failed`
    pub status: String,
    pub order_id: Option<String>,
    pub method: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub captured: Option<bool>,
}

/// Razorpay's error envelope: `{"error": {"code": ..., "description": ...}}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RazorpayErrorResponse {
    pub error: RazorpayErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RazorpayErrorDetail {
    pub code: Option<String>,
    pub description: Option<String>,
}
