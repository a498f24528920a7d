//! The public API of the donation engine.
//!
//! Each API struct wraps a backend (anything implementing the relevant [`crate::traits`]) and exposes the flows the
//! server needs. None of them hold state of their own, so they are cheap to clone into web workers.
pub mod aggregation_api;
pub mod campaign_api;
pub mod campaign_objects;
pub mod donation_flow_api;
pub mod donation_objects;
pub mod errors;
pub mod order_api;
pub mod order_objects;
pub mod validation;
