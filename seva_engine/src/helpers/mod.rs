mod contact;
mod receipt;

pub use contact::{is_plausible_email, normalize_indian_mobile};
pub use receipt::{is_valid_payment_reference, new_receipt_id};
