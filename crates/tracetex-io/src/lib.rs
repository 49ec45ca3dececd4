//! # tracetex-io: simulator trace parsing
//!
//! Reads whitespace-delimited ASCII traces written by ngspice (`wrdata`) and
//! turns them into [`SimulationRecord`]s.
//!
//! ## Pipeline
//!
//! 1. **Classification** ([`dispatch::classify`]) - the file stem selects AC, DC or Smith
//! 2. **Row parsing** ([`row`]) - tokenize, skip short rows, convert numbers
//! 3. **Column layout** ([`formats`]) - pick columns, apply the divisor, build the axis
//! 4. **Record** - [`SimulationRecord`] with the output target already derived
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tracetex_io::{load_record, DispatchPolicy, ParseOptions};
//!
//! let record = load_record(
//!     Path::new("simulation_data/sweep_ac.txt"),
//!     DispatchPolicy::FirstMatch,
//!     &ParseOptions::default(),
//! )?;
//! println!(
//!     "{} samples, decades {}..{}",
//!     record.sample_count(),
//!     record.start_exponent(),
//!     record.end_exponent()
//! );
//! # Ok::<(), tracetex_core::TraceError>(())
//! ```
//!
//! ## Supported Layouts
//!
//! | Kind  | Row                                   |
//! |-------|---------------------------------------|
//! | AC    | `<freq e-notation> <value> [extra..]` |
//! | DC    | `<x> <y> [extra..]`                   |
//! | Smith | `<i> <real> <i2> <imag> [extra..]`    |

pub mod dispatch;
pub mod exponent;
pub mod formats;
pub mod row;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracetex_core::{
    output_target_for, Divisor, SimulationKind, SimulationRecord, TraceResult,
};
use tracing::debug;

pub use dispatch::{classify, is_data_file, DispatchPolicy};
pub use exponent::extract_exponent;
pub use formats::{read_kind, read_trace, ColumnLayout};

/// Settings applied to every file of a run.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Applied to dependent values of AC and DC traces
    pub divisor: Divisor,
    /// Directory the artifact will be written to
    pub output_dir: PathBuf,
    /// Artifact file extension, without the dot
    pub output_extension: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            divisor: Divisor::IDENTITY,
            output_dir: PathBuf::from("tex_files"),
            output_extension: "tex".to_string(),
        }
    }
}

/// Parse `path` as a trace of the given kind.
pub fn parse_trace(
    path: &Path,
    kind: SimulationKind,
    options: &ParseOptions,
) -> TraceResult<SimulationRecord> {
    let file = File::open(path)?;
    let (axis, y_values) = read_kind(BufReader::new(file), kind, options.divisor)?;
    debug!(file = %path.display(), %kind, samples = y_values.len(), "parsed trace");
    let output_target = output_target_for(path, &options.output_dir, &options.output_extension);
    SimulationRecord::new(path.to_path_buf(), output_target, kind, axis, y_values)
}

/// Classify `path` by name, then parse it.
pub fn load_record(
    path: &Path,
    policy: DispatchPolicy,
    options: &ParseOptions,
) -> TraceResult<SimulationRecord> {
    let kind = classify(path, policy)?;
    parse_trace(path, kind, options)
}

/// Compact description of a parsed record, for reports.
#[derive(Debug, Clone, Serialize)]
pub struct TraceSummary {
    pub source: String,
    pub kind: SimulationKind,
    pub sample_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_exponent: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_exponent: Option<i32>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub output_target: String,
}

impl TraceSummary {
    pub fn from_record(record: &SimulationRecord) -> Self {
        let series = record.plot_series();
        let is_ac = record.kind() == SimulationKind::Ac;
        Self {
            source: record.source().display().to_string(),
            kind: record.kind(),
            sample_count: record.sample_count(),
            start_exponent: is_ac.then(|| record.start_exponent()),
            end_exponent: is_ac.then(|| record.end_exponent()),
            x_range: endpoints(&series.x),
            y_range: min_max(&series.y),
            output_target: record.output_target().display().to_string(),
        }
    }
}

fn endpoints(values: &[f64]) -> (f64, f64) {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => (f64::NAN, f64::NAN),
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(*v), hi.max(*v))
    })
}
