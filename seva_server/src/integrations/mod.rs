pub mod razorpay;
pub mod sms;
