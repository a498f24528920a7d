use serde::{Deserialize, Serialize};

use crate::{
    db_types::{CampaignId, Donation, NewDonation},
    helpers::{is_plausible_email, is_valid_payment_reference, normalize_indian_mobile},
    seva_api::validation::{non_blank, AmountInput, ValidationErrors},
};

/// A donation report, as submitted by the client once the gateway checkout has completed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    pub campaign_id: Option<String>,
    pub name: Option<String>,
    pub amount: Option<AmountInput>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// The gateway's payment id. The checkout widget hands this over as `razorpay_payment_id`.
    #[serde(alias = "razorpay_payment_id")]
    pub payment_reference: Option<String>,
    /// The gateway order the payment was made against (`razorpay_order_id` from the checkout)
    #[serde(alias = "razorpay_order_id")]
    pub gateway_order_id: Option<String>,
    /// The checkout's signature over the order and payment ids (`razorpay_signature`)
    #[serde(alias = "razorpay_signature")]
    pub gateway_signature: Option<String>,
}

/// Proof from the gateway checkout that a payment was made against a particular order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutProof {
    pub order_id: String,
    pub signature: String,
}

impl DonationRequest {
    pub fn new<A: Into<AmountInput>>(campaign_id: &CampaignId, name: &str, amount: A, phone: &str) -> Self {
        Self {
            campaign_id: Some(campaign_id.to_string()),
            name: Some(name.to_string()),
            amount: Some(amount.into()),
            phone: Some(phone.to_string()),
            email: None,
            payment_reference: None,
            gateway_order_id: None,
            gateway_signature: None,
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn with_payment_reference(mut self, reference: &str) -> Self {
        self.payment_reference = Some(reference.to_string());
        self
    }

    pub fn with_checkout_proof(mut self, order_id: &str, signature: &str) -> Self {
        self.gateway_order_id = Some(order_id.to_string());
        self.gateway_signature = Some(signature.to_string());
        self
    }

    /// The checkout proof, if the client supplied one.
    pub fn checkout_proof(&self) -> Option<CheckoutProof> {
        match (non_blank(&self.gateway_order_id), non_blank(&self.gateway_signature)) {
            (Some(order_id), Some(signature)) => Some(CheckoutProof { order_id, signature }),
            _ => None,
        }
    }

    /// Checks every field and produces the donation to be written to the ledger.
    ///
    /// All problems are collected rather than stopping at the first, so that the client can fix them in one go.
    /// The phone number is normalized to E.164 and the email address is lower-cased.
    pub fn validate(&self, require_payment_reference: bool) -> Result<NewDonation, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let campaign_id = non_blank(&self.campaign_id);
        if campaign_id.is_none() {
            errors.add("campaignId", "is required");
        }
        let name = non_blank(&self.name);
        if name.is_none() {
            errors.add("name", "is required");
        }
        let amount = match &self.amount {
            None => {
                errors.add("amount", "is required");
                None
            },
            Some(a) => a.to_positive_paise().map_err(|msg| errors.add("amount", msg)).ok(),
        };
        let phone = match non_blank(&self.phone) {
            None => {
                errors.add("phone", "is required");
                None
            },
            Some(p) => {
                let normalized = normalize_indian_mobile(&p);
                if normalized.is_none() {
                    errors.add("phone", "must be a valid 10-digit Indian mobile number");
                }
                normalized
            },
        };
        let email = non_blank(&self.email).map(|e| e.to_lowercase());
        if email.as_deref().is_some_and(|e| !is_plausible_email(e)) {
            errors.add("email", "is not a valid email address");
        }
        let payment_reference = non_blank(&self.payment_reference);
        match payment_reference.as_deref() {
            None if require_payment_reference => {
                errors.add("paymentReference", "is required when payments are verified");
            },
            Some(r) if !is_valid_payment_reference(r) => {
                errors.add("paymentReference", "must be a gateway payment id such as pay_29QQoUBi66xm2f");
            },
            _ => {},
        }
        let has_order_id = non_blank(&self.gateway_order_id).is_some();
        let has_signature = non_blank(&self.gateway_signature).is_some();
        if has_order_id != has_signature {
            errors.add("gatewaySignature", "must be supplied together with gatewayOrderId");
        }
        if has_signature && payment_reference.is_none() && !require_payment_reference {
            errors.add("paymentReference", "is required with a checkout signature");
        }
        match (campaign_id, name, amount, phone) {
            (Some(campaign_id), Some(name), Some(amount), Some(phone)) if errors.is_empty() => {
                let mut donation = NewDonation::new(CampaignId::from(campaign_id), name, amount, phone);
                donation.email = email;
                donation.payment_reference = payment_reference;
                Ok(donation)
            },
            _ => Err(errors),
        }
    }
}

/// The outcome of a successful donation submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationReceipt {
    pub donation: Donation,
    /// `false` if the campaign's running total could not be bumped by this request. The donation is recorded
    /// regardless and totals computed from the ledger already include it.
    pub counter_updated: bool,
    /// `true` if the payment had already been recorded and this is a replay of the original result
    pub duplicate: bool,
}
