//! Types shared across the Seva workspace.
//!
//! * [`Paise`] is the money type. Everything that touches storage or a payment provider counts whole paise, so no
//!   floating point arithmetic ever happens on an amount after it has been parsed.
//! * [`Secret`] wraps configuration values that must never end up in a log line.
mod paise;

pub mod helpers;
pub mod op;
mod secret;

pub use paise::{Paise, PaiseConversionError, DEFAULT_CURRENCY_CODE, PAISE_PER_RUPEE};
pub use secret::Secret;
