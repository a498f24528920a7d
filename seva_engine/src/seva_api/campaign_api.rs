use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Campaign, CampaignId},
    seva_api::{
        campaign_objects::{CampaignUpdateRequest, NewCampaignRequest},
        errors::CampaignError,
    },
    traits::{CampaignManagement, CampaignStoreError},
};

/// `CampaignApi` handles campaign creation and owner edits.
pub struct CampaignApi<B> {
    db: B,
}

impl<B> Debug for CampaignApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CampaignApi")
    }
}

impl<B> CampaignApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> CampaignApi<B>
where B: CampaignManagement
{
    pub async fn create_campaign(&self, owner: &str, request: NewCampaignRequest) -> Result<Campaign, CampaignError> {
        let campaign = request.validate(owner)?;
        let campaign = self.db.insert_campaign(campaign).await?;
        info!("📋️ Campaign {} '{}' created by {owner}", campaign.campaign_id, campaign.title);
        Ok(campaign)
    }

    /// Applies an edit on behalf of `owner`. Only the user that created the campaign may edit it.
    pub async fn update_campaign(
        &self,
        owner: &str,
        campaign_id: &CampaignId,
        request: CampaignUpdateRequest,
    ) -> Result<Campaign, CampaignError> {
        let update = request.validate()?;
        let existing =
            self.db.fetch_campaign(campaign_id).await?.ok_or_else(|| CampaignError::NotFound(campaign_id.clone()))?;
        if existing.created_by != owner {
            warn!("📋️ User {owner} tried to edit campaign {campaign_id}, which belongs to {}", existing.created_by);
            return Err(CampaignError::NotOwner(campaign_id.clone()));
        }
        if update.is_empty() {
            debug!("📋️ Nothing to change for campaign {campaign_id}");
            return Ok(existing);
        }
        let updated = match self.db.update_campaign(campaign_id, update).await {
            Ok(Some(c)) => c,
            Ok(None) => return Err(CampaignError::NotFound(campaign_id.clone())),
            Err(CampaignStoreError::EmptyUpdate) => existing,
            Err(e) => return Err(e.into()),
        };
        debug!("📋️ Campaign {campaign_id} updated by its owner");
        Ok(updated)
    }
}
