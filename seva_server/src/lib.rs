//! # Seva server
//! This crate hosts the HTTP server for the Seva medical crowdfunding backend. It is responsible for:
//! * opening Razorpay payment orders for donors,
//! * recording donations once they have paid, and thanking them by SMS,
//! * serving campaigns along with how much each has raised,
//! * letting campaign owners create and edit their campaigns.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `POST /api/payment/create-order`: Opens a payment order.
//! * `POST /api/donations/donate`: Records a donation.
//! * `GET /api/donations/total/{campaign_id}`: The total raised by a campaign.
//! * `GET /api/donations/campaign/{campaign_id}`: The donations to a campaign, newest first.
//! * `GET /api/campaigns`: Campaigns with their totals, newest first.
//! * `GET /api/campaigns/{campaign_id}`: A single campaign with its total.
//! * `GET /api/campaigns/my-campaigns`: The caller's campaigns (bearer token required).
//! * `POST /api/campaigns`, `PUT /api/campaigns/{campaign_id}`: Create and edit campaigns (bearer token required).
pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod reconcile_worker;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
