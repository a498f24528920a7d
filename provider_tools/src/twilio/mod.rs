mod api;
mod config;

pub use api::{TwilioApi, TwilioMessage};
pub use config::TwilioConfig;
