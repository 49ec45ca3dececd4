//! Error types shared by every stage of the trace pipeline
//!
//! [`TraceError`] covers everything that can go wrong while turning one
//! simulator trace file into a plot: classifying the file name, reading rows,
//! recovering the sweep exponents, and validating configuration. Every
//! variant is a per-file failure; the batch layer records it and moves on.
//!
//! # Example
//!
//! ```ignore
//! use tracetex_core::{TraceError, TraceResult};
//!
//! fn load(path: &str) -> TraceResult<SimulationRecord> {
//!     let kind = classify(path)?;
//!     parse_trace(path, kind, &options)
//! }
//! ```

use thiserror::Error;

/// Failure while classifying, parsing or configuring a single trace file.
#[derive(Error, Debug)]
pub enum TraceError {
    /// File name carries none of the simulation type markers
    #[error("unclassifiable file name '{0}': expected one of the markers ac, dc, smith")]
    UnclassifiableFilename(String),

    /// File name carries more than one marker and strict dispatch is on
    #[error("ambiguous file name '{name}': matches {}", candidates.join(", "))]
    AmbiguousFilename {
        name: String,
        candidates: Vec<String>,
    },

    /// A token that should be numeric is not
    #[error("malformed row at line {line}: '{token}' is not a number")]
    MalformedRow { line: usize, token: String },

    /// Row is long enough to be data but too short for the column layout
    #[error("insufficient columns at line {line}: expected {expected}, found {found}")]
    InsufficientColumns {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// No data rows at all, so there is nothing to plot
    #[error("file contains no data rows")]
    EmptyOrDegenerateFile,

    /// Frequency token without a usable scientific-notation exponent
    #[error("cannot extract decade exponent from '{0}'")]
    ExponentParseFailure(String),

    /// Axis and samples of a record do not belong together
    #[error("inconsistent {kind} record: {reason}")]
    InconsistentRecord { kind: String, reason: String },

    /// Invalid configuration value (divisor, output settings, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (open, read, write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using TraceError.
pub type TraceResult<T> = Result<T, TraceError>;

impl TraceError {
    /// Short machine-friendly label, used in batch manifests.
    pub fn kind_label(&self) -> &'static str {
        match self {
            TraceError::UnclassifiableFilename(_) => "unclassifiable_filename",
            TraceError::AmbiguousFilename { .. } => "ambiguous_filename",
            TraceError::MalformedRow { .. } => "malformed_row",
            TraceError::InsufficientColumns { .. } => "insufficient_columns",
            TraceError::EmptyOrDegenerateFile => "empty_or_degenerate_file",
            TraceError::ExponentParseFailure(_) => "exponent_parse_failure",
            TraceError::InconsistentRecord { .. } => "inconsistent_record",
            TraceError::Config(_) => "config",
            TraceError::Io(_) => "io",
        }
    }

    /// Classification failures mean the file was never parsed.
    pub fn is_classification(&self) -> bool {
        matches!(
            self,
            TraceError::UnclassifiableFilename(_) | TraceError::AmbiguousFilename { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TraceError::MalformedRow {
            line: 7,
            token: "abc".into(),
        };
        assert!(err.to_string().contains("line 7"));
        assert!(err.to_string().contains("'abc'"));
    }

    #[test]
    fn test_ambiguous_lists_candidates() {
        let err = TraceError::AmbiguousFilename {
            name: "smith_ac".into(),
            candidates: vec!["ac".into(), "smith".into()],
        };
        assert!(err.to_string().contains("ac, smith"));
        assert!(err.is_classification());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TraceError = io_err.into();
        assert!(matches!(err, TraceError::Io(_)));
        assert_eq!(err.kind_label(), "io");
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> TraceResult<()> {
            Err(TraceError::EmptyOrDegenerateFile)
        }

        fn outer() -> TraceResult<()> {
            inner()?;
            Ok(())
        }

        assert!(matches!(outer(), Err(TraceError::EmptyOrDegenerateFile)));
    }
}
