use mockall::mock;
use seva_common::Paise;
use seva_engine::{
    campaign_objects::CampaignQueryFilter,
    db_types::{Campaign, CampaignId, CampaignUpdate, CounterCorrection, Donation, NewCampaign, NewDonation},
    traits::{
        CampaignManagement,
        CampaignStoreError,
        DonationLedger,
        GatewayOrderRequest,
        GatewayPayment,
        LedgerError,
        PaymentGateway,
        PaymentGatewayError,
        SevaDatabase,
    },
};

mock! {
    pub Database {}
    impl CampaignManagement for Database {
        async fn insert_campaign(&self, campaign: NewCampaign) -> Result<Campaign, CampaignStoreError>;
        async fn fetch_campaign(&self, campaign_id: &CampaignId) -> Result<Option<Campaign>, CampaignStoreError>;
        async fn update_campaign(&self, campaign_id: &CampaignId, update: CampaignUpdate) -> Result<Option<Campaign>, CampaignStoreError>;
        async fn search_campaigns(&self, query: CampaignQueryFilter) -> Result<Vec<Campaign>, CampaignStoreError>;
    }
    impl DonationLedger for Database {
        async fn insert_donation(&self, donation: NewDonation) -> Result<Donation, LedgerError>;
        async fn fetch_donation_by_reference(&self, reference: &str) -> Result<Option<Donation>, LedgerError>;
        async fn fetch_donations_for_campaign(&self, campaign_id: &CampaignId) -> Result<Vec<Donation>, LedgerError>;
        async fn sum_for_campaign(&self, campaign_id: &CampaignId) -> Result<Paise, LedgerError>;
        async fn sums_for_campaigns(&self, campaign_ids: &[CampaignId]) -> Result<Vec<(CampaignId, Paise)>, LedgerError>;
    }
    impl SevaDatabase for Database {
        fn url(&self) -> &str;
        async fn increment_raised(&self, campaign_id: &CampaignId, amount: Paise) -> Result<(), CampaignStoreError>;
        async fn reconcile_raised_counters(&self) -> Result<Vec<CounterCorrection>, LedgerError>;
    }
}

mock! {
    pub Gateway {}
    impl PaymentGateway for Gateway {
        async fn create_order(&self, request: GatewayOrderRequest) -> Result<serde_json::Value, PaymentGatewayError>;
        async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, PaymentGatewayError>;
        fn verify_checkout_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;
    }
}
