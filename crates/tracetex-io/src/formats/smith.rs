//! Smith chart layout: `<index> <real> <index2> <imag>`.
//!
//! ngspice writes one index column per vector, so the real and imaginary
//! parts sit in columns 1 and 3. A row with two or three fields is not data
//! this layout can place and is reported as [`TraceError::InsufficientColumns`]
//! rather than dropped. Impedances are not rescaled.

use tracetex_core::{Axis, TraceResult};

use super::ColumnLayout;
use crate::row::{field, parse_number};

const REAL_COLUMN: usize = 1;
const IMAG_COLUMN: usize = 3;
const REQUIRED_FIELDS: usize = IMAG_COLUMN + 1;

#[derive(Debug, Clone, Copy, Default)]
pub struct SmithLayout;

impl ColumnLayout for SmithLayout {
    type Row = (f64, f64);

    fn extract_columns(&self, tokens: &[&str], line: usize) -> TraceResult<Self::Row> {
        let real = field(tokens, REAL_COLUMN, REQUIRED_FIELDS, line)?;
        let imag = field(tokens, IMAG_COLUMN, REQUIRED_FIELDS, line)?;
        Ok((parse_number(real, line)?, parse_number(imag, line)?))
    }

    fn finalize(self, rows: Vec<Self::Row>) -> TraceResult<(Axis, Vec<f64>)> {
        let (real, imag): (Vec<f64>, Vec<f64>) = rows.into_iter().unzip();
        Ok((Axis::explicit(real), imag))
    }
}
