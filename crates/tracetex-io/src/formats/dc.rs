//! DC sweep layout: independent value in column 0, dependent in column 1.

use tracetex_core::{normalize, Axis, Divisor, TraceResult};

use super::ColumnLayout;
use crate::row::{field, parse_number};

#[derive(Debug, Clone, Copy)]
pub struct DcLayout {
    divisor: Divisor,
}

impl DcLayout {
    pub fn new(divisor: Divisor) -> Self {
        Self { divisor }
    }
}

impl ColumnLayout for DcLayout {
    type Row = (f64, f64);

    fn extract_columns(&self, tokens: &[&str], line: usize) -> TraceResult<Self::Row> {
        let x = parse_number(field(tokens, 0, 2, line)?, line)?;
        let y = parse_number(field(tokens, 1, 2, line)?, line)?;
        Ok((x, normalize(y, self.divisor)))
    }

    fn finalize(self, rows: Vec<Self::Row>) -> TraceResult<(Axis, Vec<f64>)> {
        let (x_values, y_values): (Vec<f64>, Vec<f64>) = rows.into_iter().unzip();
        Ok((Axis::explicit(x_values), y_values))
    }
}
