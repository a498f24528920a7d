//! Seva donation engine
//!
//! The engine holds the core logic of the Seva crowdfunding backend: campaigns, the donation ledger, payment orders
//! and the raised totals. It knows nothing about HTTP, and it is agnostic of the payment and SMS providers in use.
//!
//! The library is divided into these sections:
//! 1. The backend contracts ([`mod@traits`]). A storage backend implements [`CampaignManagement`],
//!    [`DonationLedger`] and [`SevaDatabase`]; a payment provider implements [`PaymentGateway`]. SQLite is the
//!    supported storage backend ([`SqliteDatabase`]).
//! 2. The public API (`seva_api`): [`OrderApi`] opens payment orders, [`DonationFlowApi`] records donations,
//!    [`AggregationApi`] computes totals and [`CampaignApi`] manages campaigns.
//! 3. Events ([`mod@events`]). After a donation is recorded, a [`events::DonationRecordedEvent`] is published to
//!    any subscribed hook, for example the SMS thank-you. Hooks run in the background and cannot fail a donation.
pub mod db_types;
pub mod events;
pub mod helpers;
mod seva_api;
#[cfg(feature = "sqlite")]
mod sqlite;
pub mod test_utils;
pub mod traits;

pub use seva_api::{
    aggregation_api::AggregationApi,
    campaign_api::CampaignApi,
    campaign_objects,
    donation_flow_api::DonationFlowApi,
    donation_objects,
    errors::{AggregationError, CampaignError, DonationError, OrderError},
    order_api::{OrderApi, DEFAULT_GATEWAY_TIMEOUT},
    order_objects,
    validation,
};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use traits::{CampaignManagement, DonationLedger, PaymentGateway, SevaDatabase};
