//! # Backend contracts
//!
//! These traits define what the donation engine needs from its collaborators. The engine APIs in `seva_api` are
//! generic over them, so a storage backend or payment provider only has to implement the relevant trait to be usable.
//!
//! * [`CampaignManagement`] stores and queries campaigns.
//! * [`DonationLedger`] is the append-only record of donations and the source of truth for every total.
//! * [`SevaDatabase`] is the highest-level storage contract. It ties the campaign store and the ledger together and
//!   owns the operations that touch both, such as the raised-counter maintenance.
//! * [`PaymentGateway`] is the third-party payment provider: it creates orders and reports on payments.
mod campaign_management;
mod data_objects;
mod donation_ledger;
mod payment_gateway;
mod seva_database;

pub use campaign_management::{CampaignManagement, CampaignStoreError};
pub use data_objects::{GatewayOrderRequest, GatewayPayment, GatewayPaymentStatus};
pub use donation_ledger::{DonationLedger, LedgerError};
pub use payment_gateway::{PaymentGateway, PaymentGatewayError};
pub use seva_database::SevaDatabase;
