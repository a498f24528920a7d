use std::time::Duration;

use seva_common::Secret;

pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

#[derive(Debug, Clone, Default)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: Secret<String>,
    /// The sender number, in E.164 form
    pub from_number: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl TwilioConfig {
    pub fn new<S: Into<String>>(account_sid: S, auth_token: S, from_number: S) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: Secret::new(auth_token.into()),
            from_number: from_number.into(),
            base_url: TWILIO_API_BASE.to_string(),
            timeout: Duration::from_secs(10),
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
