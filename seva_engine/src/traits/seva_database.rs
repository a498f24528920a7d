use seva_common::Paise;

use crate::{
    db_types::{CampaignId, CounterCorrection},
    traits::{CampaignManagement, CampaignStoreError, DonationLedger, LedgerError},
};

/// This trait defines the highest level of behaviour for backends supporting the donation engine.
///
/// Anything that touches both the campaign store and the ledger lives here.
#[allow(async_fn_in_trait)]
pub trait SevaDatabase: CampaignManagement + DonationLedger {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Atomically adds `amount` to the campaign's `raised` counter.
    ///
    /// This must be a single storage-level operation (no read-modify-write), so that concurrent donations never lose
    /// an update.
    async fn increment_raised(&self, campaign_id: &CampaignId, amount: Paise) -> Result<(), CampaignStoreError>;

    /// Rewrites every `raised` counter that disagrees with the ledger, returning the campaigns that were corrected.
    async fn reconcile_raised_counters(&self) -> Result<Vec<CounterCorrection>, LedgerError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), LedgerError> {
        Ok(())
    }
}
