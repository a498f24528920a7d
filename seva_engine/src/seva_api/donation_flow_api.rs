use std::{fmt::Debug, time::Duration};

use log::*;
use seva_common::DEFAULT_CURRENCY_CODE;
use tokio::time::timeout;

use crate::{
    db_types::{Campaign, Donation, NewDonation},
    events::{DonationRecordedEvent, EventProducers},
    seva_api::{
        donation_objects::{CheckoutProof, DonationReceipt, DonationRequest},
        errors::DonationError,
        order_api::DEFAULT_GATEWAY_TIMEOUT,
    },
    traits::{LedgerError, PaymentGateway, PaymentGatewayError, SevaDatabase},
};

/// `DonationFlowApi` records donations once the donor has paid through the gateway.
///
/// The steps are strictly ordered, and each failure stops the ones after it:
/// 1. the request is validated,
/// 2. the campaign must exist,
/// 3. if enabled, the payment is checked with the gateway,
/// 4. the donation is appended to the ledger (from here on the donation counts, whatever happens next),
/// 5. the campaign's running total is bumped,
/// 6. the thank-you notification is queued.
pub struct DonationFlowApi<B, G> {
    db: B,
    gateway: G,
    producers: EventProducers,
    verify_payments: bool,
    gateway_timeout: Duration,
    currency: String,
}

impl<B, G> Debug for DonationFlowApi<B, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DonationFlowApi (verify_payments: {})", self.verify_payments)
    }
}

impl<B, G> DonationFlowApi<B, G> {
    /// Creates a new donation flow. Payment verification is on by default.
    pub fn new(db: B, gateway: G, producers: EventProducers) -> Self {
        Self {
            db,
            gateway,
            producers,
            verify_payments: true,
            gateway_timeout: DEFAULT_GATEWAY_TIMEOUT,
            currency: DEFAULT_CURRENCY_CODE.to_string(),
        }
    }

    pub fn with_payment_verification(mut self, verify: bool) -> Self {
        self.verify_payments = verify;
        self
    }

    pub fn with_gateway_timeout(mut self, gateway_timeout: Duration) -> Self {
        self.gateway_timeout = gateway_timeout;
        self
    }

    /// The currency donations are made in. Verified payments must be in this currency.
    pub fn with_currency<S: Into<String>>(mut self, currency: S) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B, G> DonationFlowApi<B, G>
where
    B: SevaDatabase,
    G: PaymentGateway,
{
    pub async fn record_donation(&self, request: DonationRequest) -> Result<DonationReceipt, DonationError> {
        let new_donation = request.validate(self.verify_payments)?;
        let proof = request.checkout_proof();
        let campaign = self
            .db
            .fetch_campaign(&new_donation.campaign_id)
            .await?
            .ok_or_else(|| DonationError::CampaignNotFound(new_donation.campaign_id.clone()))?;
        if self.verify_payments {
            self.verify_payment(&new_donation, proof.as_ref()).await?;
        }
        let donation = match self.db.insert_donation(new_donation.clone()).await {
            Ok(donation) => donation,
            Err(LedgerError::DuplicatePaymentReference(reference)) => {
                return self.replay_duplicate(&new_donation, reference).await;
            },
            Err(e) => {
                error!("🔄️💸️ Could not save donation from {} to {}. {e}", new_donation.name, campaign.campaign_id);
                return Err(e.into());
            },
        };
        info!("🔄️💸️ Donation #{} of {} to campaign {} recorded", donation.id, donation.amount, campaign.campaign_id);
        let counter_updated = match self.db.increment_raised(&campaign.campaign_id, donation.amount).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "🔄️💸️ Donation #{} is recorded, but the running total for campaign {} could not be updated. The \
                     total will be repaired at the next reconciliation. {e}",
                    donation.id, campaign.campaign_id
                );
                false
            },
        };
        self.call_donation_recorded_hook(&donation, &campaign).await;
        Ok(DonationReceipt { donation, counter_updated, duplicate: false })
    }

    /// A payment reference can only ever back one donation. A resubmission of the same donation (same campaign and
    /// amount) gets the original donation back. Anything else reusing the reference is refused.
    async fn replay_duplicate(&self, attempt: &NewDonation, reference: String) -> Result<DonationReceipt, DonationError> {
        let existing = self.db.fetch_donation_by_reference(&reference).await?.ok_or_else(|| {
            DonationError::Persistence(format!("Donation with payment reference {reference} could not be loaded"))
        })?;
        if existing.campaign_id == attempt.campaign_id && existing.amount == attempt.amount {
            info!("🔄️💸️ Payment {reference} was already recorded as donation #{}. Replaying the result.", existing.id);
            Ok(DonationReceipt { donation: existing, counter_updated: false, duplicate: true })
        } else {
            warn!(
                "🔄️💸️ Payment {reference} is already recorded as donation #{} ({} to {}), but was resubmitted as {} to \
                 {}",
                existing.id, existing.amount, existing.campaign_id, attempt.amount, attempt.campaign_id
            );
            Err(DonationError::PaymentReferenceConflict(reference))
        }
    }

    /// The gateway must know the payment, it must be settled, and it must match the donation in currency and amount.
    /// If the client passed on the checkout's signature, it must be valid and name the payment's order.
    async fn verify_payment(&self, donation: &NewDonation, proof: Option<&CheckoutProof>) -> Result<(), DonationError> {
        let reference = donation
            .payment_reference
            .as_deref()
            .ok_or_else(|| DonationError::PaymentVerificationFailed("No payment reference was supplied".into()))?;
        if let Some(proof) = proof {
            if !self.gateway.verify_checkout_signature(&proof.order_id, reference, &proof.signature) {
                let msg = format!("The checkout signature for payment {reference} is invalid");
                return Err(DonationError::PaymentVerificationFailed(msg));
            }
        }
        let payment = match timeout(self.gateway_timeout, self.gateway.fetch_payment(reference)).await {
            Ok(Ok(payment)) => payment,
            Ok(Err(PaymentGatewayError::Unavailable(e))) => return Err(DonationError::GatewayUnavailable(e)),
            Ok(Err(e)) => return Err(DonationError::PaymentVerificationFailed(e.to_string())),
            Err(_) => {
                let msg = format!("No response within {}s", self.gateway_timeout.as_secs_f32());
                return Err(DonationError::GatewayUnavailable(msg));
            },
        };
        trace!("🔄️🔍️ Gateway record for {reference}: {payment:?}");
        if payment.payment_id != reference {
            let msg = format!("The gateway answered for payment {}, not {reference}", payment.payment_id);
            return Err(DonationError::PaymentVerificationFailed(msg));
        }
        if !payment.status.is_settled() {
            let msg = format!("Payment {reference} is {}, not captured or authorized", payment.status);
            return Err(DonationError::PaymentVerificationFailed(msg));
        }
        if !payment.currency.eq_ignore_ascii_case(&self.currency) {
            let msg = format!("Payment {reference} was made in {}, not {}", payment.currency, self.currency);
            return Err(DonationError::PaymentVerificationFailed(msg));
        }
        if payment.amount != donation.amount {
            let msg = format!("Payment {reference} was for {}, but the donation claims {}", payment.amount, donation.amount);
            return Err(DonationError::PaymentVerificationFailed(msg));
        }
        if let Some(proof) = proof {
            if payment.order_id.as_deref() != Some(proof.order_id.as_str()) {
                let msg = format!("Payment {reference} does not belong to order {}", proof.order_id);
                return Err(DonationError::PaymentVerificationFailed(msg));
            }
        }
        debug!("🔄️🔍️ Payment {reference} verified");
        Ok(())
    }

    async fn call_donation_recorded_hook(&self, donation: &Donation, campaign: &Campaign) {
        for emitter in &self.producers.donation_recorded_producer {
            debug!("🔄️📬️ Notifying donation recorded hook subscribers");
            let event = DonationRecordedEvent::new(donation.clone(), campaign.title.clone());
            emitter.publish_event(event).await;
        }
    }
}
