//! Per-format column layouts and the shared row consumer.
//!
//! All three trace formats are read the same way: walk the lines, drop rows
//! too short to be data, pull a fixed set of columns from the rest, then turn
//! the collected rows into an axis plus dependent samples. Only the column
//! extraction and the final step differ, so each format is a [`ColumnLayout`]
//! and [`read_trace`] is the single loop that drives them.
//!
//! | Kind  | Columns used          | Axis                    | Divisor |
//! |-------|-----------------------|-------------------------|---------|
//! | AC    | 0 (text), 1           | log range from exponents| yes     |
//! | DC    | 0, 1                  | explicit                | yes     |
//! | Smith | 1 (real), 3 (imag)    | explicit                | no      |

use std::io::BufRead;

use tracetex_core::{Axis, Divisor, SimulationKind, TraceError, TraceResult};
use tracing::debug;

use crate::row::tokenize;

mod ac;
mod dc;
mod smith;

pub use ac::AcLayout;
pub use dc::DcLayout;
pub use smith::SmithLayout;

/// Column extraction and post-processing strategy for one trace format.
pub trait ColumnLayout {
    /// What one data row contributes before post-processing.
    type Row;

    /// Pull this format's columns out of a tokenized row (at least two fields).
    fn extract_columns(&self, tokens: &[&str], line: usize) -> TraceResult<Self::Row>;

    /// Turn all rows into the axis and the dependent samples.
    fn finalize(self, rows: Vec<Self::Row>) -> TraceResult<(Axis, Vec<f64>)>;
}

/// Read every line of `reader` through `layout`.
///
/// Short rows are skipped; the first extraction error aborts the read. A
/// reader with no data rows at all yields [`TraceError::EmptyOrDegenerateFile`].
pub fn read_trace<R, L>(reader: R, layout: L) -> TraceResult<(Axis, Vec<f64>)>
where
    R: BufRead,
    L: ColumnLayout,
{
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let Some(tokens) = tokenize(&line) else {
            skipped += 1;
            continue;
        };
        rows.push(layout.extract_columns(&tokens, line_no)?);
    }
    debug!(rows = rows.len(), skipped, "trace rows read");
    if rows.is_empty() {
        return Err(TraceError::EmptyOrDegenerateFile);
    }
    layout.finalize(rows)
}

/// Dispatch to the layout for `kind`.
pub fn read_kind<R: BufRead>(
    reader: R,
    kind: SimulationKind,
    divisor: Divisor,
) -> TraceResult<(Axis, Vec<f64>)> {
    match kind {
        SimulationKind::Ac => read_trace(reader, AcLayout::new(divisor)),
        SimulationKind::Dc => read_trace(reader, DcLayout::new(divisor)),
        SimulationKind::Smith => read_trace(reader, SmithLayout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_text(
        text: &str,
        kind: SimulationKind,
        divisor: Divisor,
    ) -> TraceResult<(Axis, Vec<f64>)> {
        read_kind(text.as_bytes(), kind, divisor)
    }

    #[test]
    fn header_and_blank_lines_are_skipped() {
        let text = "frequency\n\n1.0 2.0\n  \n3.0 4.0\n";
        let (axis, y) = parse_text(text, SimulationKind::Dc, Divisor::IDENTITY).unwrap();
        assert_eq!(axis.explicit_values(), Some(&[1.0, 3.0][..]));
        assert_eq!(y, vec![2.0, 4.0]);
    }

    #[test]
    fn empty_input_is_degenerate() {
        for kind in SimulationKind::ALL {
            let err = parse_text("", *kind, Divisor::IDENTITY).unwrap_err();
            assert!(matches!(err, TraceError::EmptyOrDegenerateFile), "{kind}");
            let err = parse_text("title\n\n", *kind, Divisor::IDENTITY).unwrap_err();
            assert!(matches!(err, TraceError::EmptyOrDegenerateFile), "{kind}");
        }
    }

    #[test]
    fn malformed_row_reports_line() {
        let text = "0.0 1.0\n1.0 oops\n";
        let err = parse_text(text, SimulationKind::Dc, Divisor::IDENTITY).unwrap_err();
        assert!(matches!(err, TraceError::MalformedRow { line: 2, .. }));
    }
}
