//! Independent-axis representation and log-axis reconstruction.
//!
//! DC and Smith traces carry their independent axis explicitly. AC sweeps do
//! not: only the decade exponents of the first and last frequency survive
//! parsing, together with the sample count. The full axis is regenerated on
//! demand as a uniform log-spaced sequence, assuming (without checking) that
//! the simulator swept uniformly in log-frequency.
//!
//! ```
//! use tracetex_core::axis::{log_axis, Axis};
//!
//! let axis = Axis::LogRange { start_exponent: 6, end_exponent: 8, count: 3 };
//! assert_eq!(axis.reconstruct(), vec![1e6, 1e7, 1e8]);
//! assert_eq!(log_axis(2, 0, 3), vec![100.0, 10.0, 1.0]);
//! ```

use serde::{Deserialize, Serialize};

/// Independent axis of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Axis {
    /// Samples read straight from the file
    Explicit { values: Vec<f64> },
    /// Log-spaced axis from decade `start_exponent` to `end_exponent`
    LogRange {
        start_exponent: i32,
        end_exponent: i32,
        count: usize,
    },
}

impl Axis {
    pub fn explicit(values: Vec<f64>) -> Self {
        Axis::Explicit { values }
    }

    /// Number of samples the axis has (or will have once reconstructed).
    pub fn len(&self) -> usize {
        match self {
            Axis::Explicit { values } => values.len(),
            Axis::LogRange { count, .. } => *count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored samples, `None` for a compressed log range.
    pub fn explicit_values(&self) -> Option<&[f64]> {
        match self {
            Axis::Explicit { values } => Some(values.as_slice()),
            Axis::LogRange { .. } => None,
        }
    }

    /// Expand into a concrete sample sequence.
    pub fn reconstruct(&self) -> Vec<f64> {
        match self {
            Axis::Explicit { values } => values.clone(),
            Axis::LogRange {
                start_exponent,
                end_exponent,
                count,
            } => log_axis(*start_exponent, *end_exponent, *count),
        }
    }

    /// Scale implied by the axis shape; must agree with the record kind.
    pub fn natural_scale(&self) -> AxisScale {
        match self {
            Axis::Explicit { .. } => AxisScale::Linear,
            Axis::LogRange { .. } => AxisScale::Log,
        }
    }
}

/// Axis scale hint handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    Linear,
    Log,
}

impl AxisScale {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisScale::Linear => "linear",
            AxisScale::Log => "log",
        }
    }
}

/// `count` points spaced uniformly in log10 between `10^start` and `10^end`.
///
/// One point yields `[10^start]` and zero points yield an empty vector. A
/// reversed range descends. Endpoints are pinned to the exact integer exponents.
pub fn log_axis(start_exponent: i32, end_exponent: i32, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![pow10(f64::from(start_exponent))],
        _ => {
            let start = f64::from(start_exponent);
            let span = f64::from(end_exponent) - start;
            let last = count - 1;
            (0..count)
                .map(|i| {
                    let exponent = if i == last {
                        f64::from(end_exponent)
                    } else {
                        start + span * (i as f64) / (last as f64)
                    };
                    pow10(exponent)
                })
                .collect()
        }
    }
}

/// Decade of a positive value, tolerant of floating-point noise around exact
/// powers of ten.
pub fn decade(value: f64) -> i32 {
    let log = value.abs().log10();
    let nearest = log.round();
    if (log - nearest).abs() < 1e-9 {
        nearest as i32
    } else {
        log.floor() as i32
    }
}

fn pow10(exponent: f64) -> f64 {
    // integral exponents go through powi so decades come out exact
    if exponent.fract() == 0.0 && exponent.abs() <= f64::from(i32::MAX) {
        10f64.powi(exponent as i32)
    } else {
        10f64.powf(exponent)
    }
}
