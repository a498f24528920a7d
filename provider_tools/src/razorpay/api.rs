use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    razorpay::{
        config::RazorpayConfig,
        data_objects::{NewRazorpayOrder, RazorpayErrorResponse, RazorpayPayment},
        signature::verify_checkout_signature,
    },
    ProviderApiError,
};

#[derive(Clone)]
pub struct RazorpayApi {
    config: RazorpayConfig,
    client: Arc<Client>,
}

impl RazorpayApi {
    pub fn new(config: RazorpayConfig) -> Result<Self, ProviderApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, ProviderApiError> {
        let url = self.url(path);
        trace!("💳️ Sending Razorpay request: {method} {url}");
        let mut req = self
            .client
            .request(method, url)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.reveal().as_str()));
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| ProviderApiError::RestRequestError(e.to_string()))?;
        if response.status().is_success() {
            trace!("💳️ Razorpay request successful. {}", response.status());
            response.json::<T>().await.map_err(|e| ProviderApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let text = response.text().await.map_err(|e| ProviderApiError::RestResponseError(e.to_string()))?;
            Err(ProviderApiError::QueryError { status, message: error_description(&text) })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/v1{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Creates an order. Razorpay's order entity is returned as-is.
    pub async fn create_order(&self, order: &NewRazorpayOrder) -> Result<Value, ProviderApiError> {
        debug!("💳️ Creating Razorpay order for {} {} ({})", order.amount, order.currency, order.receipt);
        let result = self.rest_query::<Value, _>(Method::POST, "/orders", Some(order)).await?;
        info!("💳️ Razorpay order {} created", result["id"].as_str().unwrap_or("(no id)"));
        Ok(result)
    }

    pub async fn fetch_payment(&self, payment_id: &str) -> Result<RazorpayPayment, ProviderApiError> {
        let path = payment_path(payment_id);
        debug!("💳️ Fetching Razorpay payment {payment_id}");
        self.rest_query::<RazorpayPayment, ()>(Method::GET, &path, None).await
    }

    /// Checks a checkout signature against this account's key secret.
    pub fn verify_checkout_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_checkout_signature(self.config.key_secret.reveal(), order_id, payment_id, signature)
    }
}

/// The payment id is always a single path segment, whatever characters it contains.
fn payment_path(payment_id: &str) -> String {
    format!("/payments/{}", urlencoding::encode(payment_id))
}

/// Pulls the human-readable description out of a Razorpay error body, falling back to the raw text.
fn error_description(body: &str) -> String {
    match serde_json::from_str::<RazorpayErrorResponse>(body) {
        Ok(RazorpayErrorResponse { error }) => match (error.code, error.description) {
            (Some(code), Some(description)) => format!("{code}: {description}"),
            (None, Some(description)) => description,
            (Some(code), None) => code,
            (None, None) => body.to_string(),
        },
        Err(_) => body.to_string(),
    }
}
