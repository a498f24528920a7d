use std::sync::OnceLock;

use chrono::Utc;
use rand::Rng;
use regex::Regex;

static PAYMENT_REFERENCE: OnceLock<Regex> = OnceLock::new();

/// Generates a gateway receipt reference of the form `receipt_order_{unix millis}_{6 hex digits}`.
///
/// The timestamp keeps receipts traceable by eye, and the random suffix keeps two orders created in the same
/// millisecond apart. The result is well inside the 40 characters gateways accept.
pub fn new_receipt_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..0x100_0000);
    format!("receipt_order_{millis}_{suffix:06x}")
}

/// True if `reference` has the shape of a gateway payment id, `pay_` followed by letters and digits.
pub fn is_valid_payment_reference(reference: &str) -> bool {
    PAYMENT_REFERENCE
        .get_or_init(|| Regex::new(r"^pay_[A-Za-z0-9]+$").expect("literal regex is valid"))
        .is_match(reference)
}
