use std::{fmt::Display, iter::Sum};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const DEFAULT_CURRENCY_CODE: &str = "INR";
pub const PAISE_PER_RUPEE: i64 = 100;

// Comfortably inside the range where every whole number of paise is exactly representable as an f64.
const MAX_MAJOR_UNITS: f64 = 1.0e13;

//--------------------------------------       Paise         ---------------------------------------------------------
/// An amount of money in minor currency units.
///
/// `Paise` is stored and summed as an integer. On the JSON API it is written in major units (rupees), so that
/// `Paise::from(200_000)` serializes as `2000` and `Paise::from(1250)` as `12.5`. Deserialization accepts the same
/// representation and refuses anything that cannot be expressed in whole paise.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, PartialEq, Eq, Hash)]
#[sqlx(transparent)]
pub struct Paise(i64);

op!(binary Paise, Add, add);
op!(binary Paise, Sub, sub);
op!(inplace Paise, AddAssign, add_assign);
op!(inplace Paise, SubAssign, sub_assign);
op!(unary Paise, Neg, neg);

impl Sum for Paise {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, v| acc + v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Value cannot be represented in paise: {0}")]
pub struct PaiseConversionError(String);

impl From<i64> for Paise {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl TryFrom<u64> for Paise {
    type Error = PaiseConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        i64::try_from(value)
            .map(Self)
            .map_err(|_| PaiseConversionError(format!("{value} is too large to convert to Paise")))
    }
}

impl Display for Paise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{}", self.major_units_string())
    }
}

impl Paise {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_major(rupees: i64) -> Self {
        Self(rupees * PAISE_PER_RUPEE)
    }

    /// Converts an amount in major units into paise.
    ///
    /// Fails for NaN and infinities, for magnitudes beyond 10^13 rupees, and for amounts with fractional paise
    /// (e.g. `10.005`). The sign is preserved; callers decide whether zero or negative amounts are acceptable.
    pub fn try_from_major(major: f64) -> Result<Self, PaiseConversionError> {
        if !major.is_finite() {
            return Err(PaiseConversionError(format!("{major} is not a finite number")));
        }
        if major.abs() > MAX_MAJOR_UNITS {
            return Err(PaiseConversionError(format!("{major} is out of range")));
        }
        let scaled = major * PAISE_PER_RUPEE as f64;
        let rounded = scaled.round();
        if (scaled - rounded).abs() > 1e-6 {
            return Err(PaiseConversionError(format!("{major} has fractional paise")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(rounded as i64))
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / PAISE_PER_RUPEE as f64
    }

    /// Major units as text, omitting the decimals for whole amounts: `2000`, `12.50`, `-0.05`.
    pub fn major_units_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = abs / PAISE_PER_RUPEE as u64;
        let minor = abs % PAISE_PER_RUPEE as u64;
        if minor == 0 {
            format!("{sign}{major}")
        } else {
            format!("{sign}{major}.{minor:02}")
        }
    }
}

impl Serialize for Paise {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % PAISE_PER_RUPEE == 0 {
            serializer.serialize_i64(self.0 / PAISE_PER_RUPEE)
        } else {
            serializer.serialize_f64(self.to_major_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Paise {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let major = f64::deserialize(deserializer)?;
        Paise::try_from_major(major).map_err(serde::de::Error::custom)
    }
}
