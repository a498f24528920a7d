mod api;
mod config;
mod data_objects;
mod signature;

pub use api::RazorpayApi;
pub use config::RazorpayConfig;
pub use data_objects::{NewRazorpayOrder, RazorpayPayment};
pub use signature::{checkout_signature, verify_checkout_signature};
