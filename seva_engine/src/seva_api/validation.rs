use std::fmt::Display;

use serde::{Deserialize, Serialize};
use seva_common::Paise;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every problem found with a request, keyed by the (JSON) name of the offending field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn add<S: Into<String>>(&mut self, field: &str, message: S) {
        self.0.push(FieldError { field: field.to_string(), message: message.into() });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Returns `value` if no errors were recorded.
    pub fn or_value<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let details = self.0.iter().map(|e| format!("{} {}", e.field, e.message)).collect::<Vec<_>>().join("; ");
        write!(f, "Invalid or missing fields: {details}")
    }
}

impl std::error::Error for ValidationErrors {}

/// A monetary amount in major units, as submitted by a client.
///
/// Browsers are not consistent about sending numbers rather than numeric strings, so both are accepted. Whether the
/// value is actually usable is decided by [`AmountInput::to_positive_paise`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    pub fn to_positive_paise(&self) -> Result<Paise, String> {
        let major = match self {
            AmountInput::Number(n) => *n,
            AmountInput::Text(s) => s.trim().parse::<f64>().map_err(|_| format!("'{s}' is not a number"))?,
        };
        if !major.is_finite() {
            return Err("must be a finite number".into());
        }
        if major <= 0.0 {
            return Err("must be greater than zero".into());
        }
        let paise = Paise::try_from_major(major).map_err(|e| e.to_string())?;
        if !paise.is_positive() {
            return Err("must be at least one paisa".into());
        }
        Ok(paise)
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

/// Trims an optional text field, mapping blank values to `None`.
pub(crate) fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}
