use thiserror::Error;

use crate::{
    db_types::{Campaign, CampaignId, CampaignUpdate, NewCampaign},
    seva_api::campaign_objects::CampaignQueryFilter,
};

#[derive(Debug, Clone, Error)]
pub enum CampaignStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Campaign {0} does not exist")]
    CampaignNotFound(CampaignId),
    #[error("The campaign update request contained no changes")]
    EmptyUpdate,
}

impl From<sqlx::Error> for CampaignStoreError {
    fn from(e: sqlx::Error) -> Self {
        CampaignStoreError::DatabaseError(e.to_string())
    }
}

/// The campaign store.
///
/// Campaigns are created by their owners and can be edited, but never deleted. Listings are always newest first.
#[allow(async_fn_in_trait)]
pub trait CampaignManagement {
    /// Saves a new campaign and returns the stored record. The `raised` counter of a new campaign is always zero.
    async fn insert_campaign(&self, campaign: NewCampaign) -> Result<Campaign, CampaignStoreError>;

    /// Fetches the campaign with the given public id. If no such campaign exists, `None` is returned.
    async fn fetch_campaign(&self, campaign_id: &CampaignId) -> Result<Option<Campaign>, CampaignStoreError>;

    /// Applies a partial edit to a campaign. Returns `None` if the campaign does not exist.
    ///
    /// An update with no fields set is rejected with [`CampaignStoreError::EmptyUpdate`].
    async fn update_campaign(
        &self,
        campaign_id: &CampaignId,
        update: CampaignUpdate,
    ) -> Result<Option<Campaign>, CampaignStoreError>;

    /// Returns the campaigns matching the filter, newest first.
    async fn search_campaigns(&self, query: CampaignQueryFilter) -> Result<Vec<Campaign>, CampaignStoreError>;
}
