use std::time::Duration;

use seva_common::Secret;

pub const RAZORPAY_API_BASE: &str = "https://api.razorpay.com";

#[derive(Debug, Clone, Default)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: Secret<String>,
    pub base_url: String,
    /// Upper bound on any single call to Razorpay
    pub timeout: Duration,
}

impl RazorpayConfig {
    pub fn new<S: Into<String>>(key_id: S, key_secret: S) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: Secret::new(key_secret.into()),
            base_url: RAZORPAY_API_BASE.to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
