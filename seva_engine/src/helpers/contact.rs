use std::sync::OnceLock;

use regex::Regex;

static MOBILE_NUMBER: OnceLock<Regex> = OnceLock::new();
static EMAIL_ADDRESS: OnceLock<Regex> = OnceLock::new();

fn mobile_number_regex() -> &'static Regex {
    // An optional +91 / 91 / 0 prefix followed by a ten-digit mobile number, which always starts with 6-9
    MOBILE_NUMBER.get_or_init(|| Regex::new(r"^(?:\+?91|0)?([6-9]\d{9})$").expect("literal regex is valid"))
}

fn email_regex() -> &'static Regex {
    EMAIL_ADDRESS.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("literal regex is valid"))
}

/// Normalizes an Indian mobile number into E.164 form (`+91XXXXXXXXXX`).
///
/// Spaces, dashes and parentheses are ignored. Returns `None` if what remains is not a valid mobile number.
pub fn normalize_indian_mobile(raw: &str) -> Option<String> {
    let compact = raw.chars().filter(|c| !matches!(c, ' ' | '-' | '(' | ')')).collect::<String>();
    let captures = mobile_number_regex().captures(&compact)?;
    captures.get(1).map(|m| format!("+91{}", m.as_str()))
}

pub fn is_plausible_email(email: &str) -> bool {
    email_regex().is_match(email)
}
