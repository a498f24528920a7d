//! `SqliteDatabase` is the SQLite implementation of the donation engine backend.
//!
//! It implements every storage trait in [`crate::traits`].
use std::fmt::Debug;

use log::*;
use seva_common::Paise;
use sqlx::{migrate::MigrateError, SqlitePool};

use super::db::{campaigns, donations, new_pool};
use crate::{
    db_types::{Campaign, CampaignId, CampaignUpdate, CounterCorrection, Donation, NewCampaign, NewDonation},
    seva_api::campaign_objects::CampaignQueryFilter,
    traits::{CampaignManagement, CampaignStoreError, DonationLedger, LedgerError, SevaDatabase},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqliteDatabase ({})", self.url)
    }
}

impl SqliteDatabase {
    /// Connects to the database at `url`, creating it if necessary.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    /// Brings the schema up to date. Safe to call on every start.
    pub async fn run_migrations(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl CampaignManagement for SqliteDatabase {
    async fn insert_campaign(&self, campaign: NewCampaign) -> Result<Campaign, CampaignStoreError> {
        let mut conn = self.pool.acquire().await?;
        let campaign = campaigns::insert_campaign(campaign, &mut conn).await?;
        debug!("🗃️ Campaign {} saved with id {}", campaign.campaign_id, campaign.id);
        Ok(campaign)
    }

    async fn fetch_campaign(&self, campaign_id: &CampaignId) -> Result<Option<Campaign>, CampaignStoreError> {
        let mut conn = self.pool.acquire().await?;
        let campaign = campaigns::fetch_campaign(campaign_id, &mut conn).await?;
        Ok(campaign)
    }

    async fn update_campaign(
        &self,
        campaign_id: &CampaignId,
        update: CampaignUpdate,
    ) -> Result<Option<Campaign>, CampaignStoreError> {
        let mut conn = self.pool.acquire().await?;
        campaigns::update_campaign(campaign_id, update, &mut conn).await
    }

    async fn search_campaigns(&self, query: CampaignQueryFilter) -> Result<Vec<Campaign>, CampaignStoreError> {
        let mut conn = self.pool.acquire().await?;
        let campaigns = campaigns::search_campaigns(query, &mut conn).await?;
        Ok(campaigns)
    }
}

impl DonationLedger for SqliteDatabase {
    async fn insert_donation(&self, donation: NewDonation) -> Result<Donation, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        let donation = donations::insert_donation(donation, &mut conn).await?;
        debug!("🗃️ Donation #{} of {} to {} saved", donation.id, donation.amount, donation.campaign_id);
        Ok(donation)
    }

    async fn fetch_donation_by_reference(&self, reference: &str) -> Result<Option<Donation>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        let donation = donations::fetch_donation_by_reference(reference, &mut conn).await?;
        Ok(donation)
    }

    async fn fetch_donations_for_campaign(&self, campaign_id: &CampaignId) -> Result<Vec<Donation>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        let donations = donations::fetch_donations_for_campaign(campaign_id, &mut conn).await?;
        Ok(donations)
    }

    async fn sum_for_campaign(&self, campaign_id: &CampaignId) -> Result<Paise, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        let sum = donations::sum_for_campaign(campaign_id, &mut conn).await?;
        Ok(sum)
    }

    async fn sums_for_campaigns(&self, campaign_ids: &[CampaignId]) -> Result<Vec<(CampaignId, Paise)>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        let sums = donations::sums_for_campaigns(campaign_ids, &mut conn).await?;
        Ok(sums)
    }
}

impl SevaDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn increment_raised(&self, campaign_id: &CampaignId, amount: Paise) -> Result<(), CampaignStoreError> {
        let mut conn = self.pool.acquire().await?;
        campaigns::increment_raised(campaign_id, amount, &mut conn).await
    }

    /// Finds the drifted counters and resets each one from the ledger, in a single transaction.
    ///
    /// The reset recomputes the sum at write time, so a donation landing between the two steps is not lost. The
    /// reported `corrected` value is the one actually written.
    async fn reconcile_raised_counters(&self) -> Result<Vec<CounterCorrection>, LedgerError> {
        let mut tx = self.pool.begin().await?;
        let stale = campaigns::stale_counters(&mut tx).await?;
        let mut corrections = Vec::with_capacity(stale.len());
        for entry in stale {
            let corrected = campaigns::reset_counter_from_ledger(&entry.campaign_id, &mut tx).await?;
            corrections.push(CounterCorrection { corrected, ..entry });
        }
        tx.commit().await?;
        if !corrections.is_empty() {
            debug!("🗃️ {} campaign counters were reset from the ledger", corrections.len());
        }
        Ok(corrections)
    }

    async fn close(&mut self) -> Result<(), LedgerError> {
        self.pool.close().await;
        Ok(())
    }
}
