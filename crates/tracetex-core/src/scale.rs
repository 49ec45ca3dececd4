//! Unit rescaling of dependent-variable samples.
//!
//! Simulator traces are written in base SI units. To show a trace in
//! milli-units the caller supplies a divisor of `1e-3`; every dependent sample
//! is divided by it. The divisor is chosen once per run, never per row.
//!
//! ```
//! use tracetex_core::scale::{normalize, Divisor};
//!
//! let milli = Divisor::new(1e-3).unwrap();
//! assert!((normalize(0.002, milli) - 2.0).abs() < 1e-12);
//! assert_eq!(normalize(42.0, Divisor::IDENTITY), 42.0);
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{TraceError, TraceResult};

/// Non-zero, finite divisor applied to dependent values.
///
/// Construction is the only validation point: a `Divisor` that exists can
/// always be divided by.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
#[repr(transparent)]
pub struct Divisor(f64);

impl Divisor {
    /// Divisor of one, leaves values untouched
    pub const IDENTITY: Divisor = Divisor(1.0);

    /// Validate and wrap a raw divisor.
    pub fn new(value: f64) -> TraceResult<Self> {
        if !value.is_finite() {
            return Err(TraceError::Config(format!(
                "divisor must be finite, got {value}"
            )));
        }
        if value == 0.0 {
            return Err(TraceError::Config("divisor must be non-zero".to_string()));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self.0 == 1.0
    }
}

impl Default for Divisor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<f64> for Divisor {
    type Error = TraceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Divisor::new(value)
    }
}

impl From<Divisor> for f64 {
    fn from(divisor: Divisor) -> Self {
        divisor.0
    }
}

impl FromStr for Divisor {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| TraceError::Config(format!("divisor '{s}' is not a number")))?;
        Divisor::new(value)
    }
}

impl std::fmt::Display for Divisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rescale one dependent sample.
#[inline]
pub fn normalize(raw_value: f64, divisor: Divisor) -> f64 {
    raw_value / divisor.0
}
