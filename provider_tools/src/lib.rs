//! Thin REST clients for the third-party providers the Seva backend talks to.
//!
//! * [`razorpay`]: payment orders, payment lookups and checkout signature checks.
//! * [`twilio`]: outbound SMS.
//!
//! The clients speak the providers' own vocabulary (minor units, provider field names). Mapping onto the donation
//! engine's types is left to the server.
mod error;
pub mod razorpay;
pub mod twilio;

pub use error::ProviderApiError;
