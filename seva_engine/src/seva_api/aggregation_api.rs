use std::{collections::HashMap, fmt::Debug};

use log::*;
use seva_common::Paise;

use crate::{
    db_types::{CampaignId, CounterCorrection, Donation},
    seva_api::{
        campaign_objects::{CampaignQueryFilter, CampaignWithTotal},
        errors::AggregationError,
    },
    traits::{CampaignManagement, DonationLedger, SevaDatabase},
};

/// `AggregationApi` answers every "how much has been raised" question.
///
/// Totals are always computed from the donation ledger. The `raised` counter on a campaign is never consulted here;
/// it is only repaired, by [`AggregationApi::reconcile_counters`].
pub struct AggregationApi<B> {
    db: B,
}

impl<B> Debug for AggregationApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AggregationApi")
    }
}

impl<B> AggregationApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> AggregationApi<B>
where B: CampaignManagement + DonationLedger
{
    /// The total donated to the campaign so far. Zero, not an error, if nothing has been donated (or if the campaign
    /// does not exist).
    pub async fn total_for_campaign(&self, campaign_id: &CampaignId) -> Result<Paise, AggregationError> {
        let total = self.db.sum_for_campaign(campaign_id).await?;
        trace!("🧮️ Campaign {campaign_id} has raised {total}");
        Ok(total)
    }

    /// Totals for several campaigns at once. Every requested campaign appears in the result; those without donations
    /// map to zero.
    pub async fn totals_for_campaigns(
        &self,
        campaign_ids: &[CampaignId],
    ) -> Result<HashMap<CampaignId, Paise>, AggregationError> {
        if campaign_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut totals = campaign_ids.iter().map(|id| (id.clone(), Paise::default())).collect::<HashMap<_, _>>();
        let sums = self.db.sums_for_campaigns(campaign_ids).await?;
        for (id, sum) in sums {
            totals.insert(id, sum);
        }
        Ok(totals)
    }

    pub async fn campaign_with_total(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<Option<CampaignWithTotal>, AggregationError> {
        let Some(campaign) = self.db.fetch_campaign(campaign_id).await? else {
            return Ok(None);
        };
        let total = self.db.sum_for_campaign(campaign_id).await?;
        Ok(Some(CampaignWithTotal::new(campaign, total)))
    }

    /// Campaigns matching the filter, newest first, with their totals.
    pub async fn campaigns_with_totals(
        &self,
        query: CampaignQueryFilter,
    ) -> Result<Vec<CampaignWithTotal>, AggregationError> {
        let campaigns = self.db.search_campaigns(query).await?;
        let ids = campaigns.iter().map(|c| c.campaign_id.clone()).collect::<Vec<_>>();
        let mut totals = self.totals_for_campaigns(&ids).await?;
        let result = campaigns
            .into_iter()
            .map(|c| {
                let total = totals.remove(&c.campaign_id).unwrap_or_default();
                CampaignWithTotal::new(c, total)
            })
            .collect();
        Ok(result)
    }

    /// The donations made to a campaign, newest first.
    pub async fn donations_for_campaign(&self, campaign_id: &CampaignId) -> Result<Vec<Donation>, AggregationError> {
        let donations = self.db.fetch_donations_for_campaign(campaign_id).await?;
        Ok(donations)
    }
}

impl<B> AggregationApi<B>
where B: SevaDatabase
{
    /// Rewrites every campaign's `raised` counter that has drifted from the ledger.
    pub async fn reconcile_counters(&self) -> Result<Vec<CounterCorrection>, AggregationError> {
        let corrections = self.db.reconcile_raised_counters().await?;
        for c in &corrections {
            info!("🧮️ Campaign {} counter corrected from {} to {}", c.campaign_id, c.previous, c.corrected);
        }
        Ok(corrections)
    }
}
