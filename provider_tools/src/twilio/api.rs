use std::sync::Arc;

use log::*;
use reqwest::Client;
use serde::Deserialize;

use crate::{twilio::config::TwilioConfig, ProviderApiError};

/// The parts of Twilio's message resource that we log.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TwilioMessage {
    pub sid: String,
    pub status: String,
    pub to: Option<String>,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct TwilioErrorResponse {
    code: Option<i64>,
    message: Option<String>,
}

#[derive(Clone)]
pub struct TwilioApi {
    config: TwilioConfig,
    client: Arc<Client>,
}

impl TwilioApi {
    pub fn new(config: TwilioConfig) -> Result<Self, ProviderApiError> {
        let client =
            Client::builder().timeout(config.timeout).build().map_err(|e| ProviderApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    /// Sends an SMS from the configured number to `to` (E.164).
    pub async fn send_sms(&self, to: &str, body: &str) -> Result<TwilioMessage, ProviderApiError> {
        let form = [("To", to), ("From", self.config.from_number.as_str()), ("Body", body)];
        trace!("📱️ Sending SMS to {to}");
        let response = self
            .client
            .post(self.url())
            .basic_auth(&self.config.account_sid, Some(self.config.auth_token.reveal().as_str()))
            .form(&form)
            .send()
            .await
            .map_err(|e| ProviderApiError::RestRequestError(e.to_string()))?;
        if response.status().is_success() {
            let message =
                response.json::<TwilioMessage>().await.map_err(|e| ProviderApiError::JsonError(e.to_string()))?;
            debug!("📱️ SMS {} to {to} is {}", message.sid, message.status);
            Ok(message)
        } else {
            let status = response.status().as_u16();
            let text = response.text().await.map_err(|e| ProviderApiError::RestResponseError(e.to_string()))?;
            let message = match serde_json::from_str::<TwilioErrorResponse>(&text) {
                Ok(TwilioErrorResponse { code: Some(code), message: Some(msg) }) => format!("{code}: {msg}"),
                _ => text,
            };
            Err(ProviderApiError::QueryError { status, message })
        }
    }
}
