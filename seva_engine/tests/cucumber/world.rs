use std::collections::HashMap;

use cucumber::World;
use log::*;
use seva_engine::{
    db_types::CampaignId,
    donation_objects::DonationReceipt,
    events::EventProducers,
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    AggregationApi,
    DonationError,
    DonationFlowApi,
    SqliteDatabase,
};

use crate::support::StubGateway;

#[derive(Default, Debug, World)]
pub struct DonationWorld {
    pub system: Option<DonationSystem>,
    /// Campaign ids keyed by the titles used in the feature files
    pub campaigns: HashMap<String, CampaignId>,
    pub last_result: Option<Result<DonationReceipt, DonationError>>,
}

#[derive(Debug)]
pub struct DonationSystem {
    pub db_path: String,
    pub db: SqliteDatabase,
    pub flow: DonationFlowApi<SqliteDatabase, StubGateway>,
    pub aggregation: AggregationApi<SqliteDatabase>,
}

impl DonationSystem {
    pub async fn new() -> Self {
        let url = random_db_path();
        let db = prepare_test_env(&url).await;
        debug!("Created database: {url}");
        let flow = DonationFlowApi::new(db.clone(), StubGateway::default(), EventProducers::default())
            .with_payment_verification(false);
        let aggregation = AggregationApi::new(db.clone());
        Self { db_path: url, db, flow, aggregation }
    }
}

impl DonationWorld {
    pub async fn system(&mut self) -> &DonationSystem {
        if self.system.is_none() {
            self.system = Some(DonationSystem::new().await);
        }
        self.system.as_ref().expect("System was just initialised")
    }

    pub fn campaign_id(&self, title: &str) -> CampaignId {
        self.campaigns.get(title).cloned().unwrap_or_else(|| CampaignId::from(title))
    }
}
