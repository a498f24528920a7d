//! Razorpay checkout signatures.
//!
//! When a checkout completes, Razorpay hands the client `razorpay_order_id`, `razorpay_payment_id` and
//! `razorpay_signature`, where the signature is the hex-encoded HMAC-SHA256 of `"{order_id}|{payment_id}"` keyed with
//! the API key secret.
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn keyed_mac(key_secret: &str, order_id: &str, payment_id: &str) -> HmacSha256 {
    // HMAC accepts keys of any length
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key_secret.as_bytes()).unwrap_or_else(|_| unreachable!());
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac
}

/// The signature Razorpay produces for the given order and payment.
pub fn checkout_signature(key_secret: &str, order_id: &str, payment_id: &str) -> String {
    hex::encode(keyed_mac(key_secret, order_id, payment_id).finalize().into_bytes())
}

/// Checks a checkout signature in constant time.
pub fn verify_checkout_signature(key_secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let Ok(signature) = hex::decode(signature.trim()) else {
        return false;
    };
    keyed_mac(key_secret, order_id, payment_id).verify_slice(&signature).is_ok()
}
