use seva_common::Paise;
use thiserror::Error;

use crate::db_types::{CampaignId, Donation, NewDonation};

#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("A donation with payment reference {0} has already been recorded")]
    DuplicatePaymentReference(String),
    #[error("Cannot record a donation against campaign {0}, since it does not exist")]
    UnknownCampaign(CampaignId),
}

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        LedgerError::DatabaseError(e.to_string())
    }
}

/// The donation ledger.
///
/// Entries are append-only. Every total the system reports is computed from here.
#[allow(async_fn_in_trait)]
pub trait DonationLedger {
    /// Appends a donation to the ledger. Once this returns successfully, the donation is durable.
    ///
    /// Fails with [`LedgerError::DuplicatePaymentReference`] if another donation already carries the same payment
    /// reference, and with [`LedgerError::UnknownCampaign`] if the campaign does not exist.
    async fn insert_donation(&self, donation: NewDonation) -> Result<Donation, LedgerError>;

    async fn fetch_donation_by_reference(&self, reference: &str) -> Result<Option<Donation>, LedgerError>;

    /// All the donations made to a campaign, newest first.
    async fn fetch_donations_for_campaign(&self, campaign_id: &CampaignId) -> Result<Vec<Donation>, LedgerError>;

    /// The sum of all donations to the campaign. Zero if there are none.
    async fn sum_for_campaign(&self, campaign_id: &CampaignId) -> Result<Paise, LedgerError>;

    /// Donation sums for a set of campaigns, in a single round trip. Campaigns without any donations are absent from
    /// the result.
    async fn sums_for_campaigns(&self, campaign_ids: &[CampaignId]) -> Result<Vec<(CampaignId, Paise)>, LedgerError>;
}
