//! Thank-you SMS messages for donors.
//!
//! The message is sent from the donation recorded hook, so it runs after the donation is already stored and the donor
//! has had their response. A failed or slow send is logged and otherwise ignored.
use std::{future::Future, time::Duration};

use futures::future::BoxFuture;
use log::*;
use provider_tools::{
    twilio::{TwilioApi, TwilioConfig},
    ProviderApiError,
};
use seva_engine::events::{DonationRecordedEvent, EventHandlers, EventHooks};
use thiserror::Error;

pub const SMS_EVENT_BUFFER_SIZE: usize = 100;

#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("The SMS provider did not answer within {0:?}")]
    Timeout(Duration),
    #[error("The SMS provider refused the message. {0}")]
    Provider(String),
}

impl From<ProviderApiError> for NotificationError {
    fn from(e: ProviderApiError) -> Self {
        Self::Provider(e.to_string())
    }
}

/// Anything that can deliver a text message. Returns the provider's message id.
pub trait SmsSender: Clone + Send + Sync + 'static {
    fn send_sms(&self, to: &str, body: &str) -> impl Future<Output = Result<String, NotificationError>> + Send;
}

impl SmsSender for TwilioApi {
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, NotificationError> {
        let message = TwilioApi::send_sms(self, to, body).await?;
        Ok(message.sid)
    }
}

pub fn thank_you_message(event: &DonationRecordedEvent) -> String {
    format!(
        "Thank you {} for your generous donation of ₹{} to \"{}\". Your support means the world! - Team Seva",
        event.donation.name,
        event.donation.amount.major_units_string(),
        event.campaign_title
    )
}

/// Sends the thank-you for a donation, giving up after `timeout`.
pub async fn send_thank_you<S: SmsSender>(
    sender: &S,
    event: &DonationRecordedEvent,
    timeout: Duration,
) -> Result<String, NotificationError> {
    let body = thank_you_message(event);
    tokio::time::timeout(timeout, sender.send_sms(&event.donation.phone, &body))
        .await
        .map_err(|_| NotificationError::Timeout(timeout))?
}

pub fn sms_hooks<S: SmsSender>(sender: S, timeout: Duration) -> EventHooks {
    let mut hooks = EventHooks::default();
    hooks.on_donation_recorded(move |ev| -> BoxFuture<'static, ()> {
        let sender = sender.clone();
        Box::pin(async move {
            let donation_id = ev.donation.id;
            match send_thank_you(&sender, &ev, timeout).await {
                Ok(sid) => info!("📱️ Thank-you SMS {sid} sent for donation #{donation_id}"),
                Err(e) => warn!("📱️ Could not send the thank-you SMS for donation #{donation_id}. {e}"),
            }
        })
    });
    hooks
}

/// Builds the event handlers that send thank-you messages through Twilio.
pub fn create_sms_event_handlers(config: TwilioConfig, timeout: Duration) -> Result<EventHandlers, ProviderApiError> {
    let api = TwilioApi::new(config)?;
    let hooks = sms_hooks(api, timeout);
    Ok(EventHandlers::new(SMS_EVENT_BUFFER_SIZE, hooks))
}
