//! AC sweep layout: frequency text in column 0, magnitude in column 1.

use tracetex_core::{normalize, Axis, Divisor, TraceError, TraceResult};

use super::ColumnLayout;
use crate::exponent::extract_exponent;
use crate::row::{field, parse_number};

/// Keeps the raw frequency token per row; only the first and last are ever
/// decoded, into the decade exponents of an [`Axis::LogRange`].
#[derive(Debug, Clone, Copy)]
pub struct AcLayout {
    divisor: Divisor,
}

impl AcLayout {
    pub fn new(divisor: Divisor) -> Self {
        Self { divisor }
    }
}

impl ColumnLayout for AcLayout {
    type Row = (String, f64);

    fn extract_columns(&self, tokens: &[&str], line: usize) -> TraceResult<Self::Row> {
        let frequency = field(tokens, 0, 2, line)?;
        let value = parse_number(field(tokens, 1, 2, line)?, line)?;
        Ok((frequency.to_string(), normalize(value, self.divisor)))
    }

    fn finalize(self, rows: Vec<Self::Row>) -> TraceResult<(Axis, Vec<f64>)> {
        let (first, last) = match (rows.first(), rows.last()) {
            (Some(first), Some(last)) => (&first.0, &last.0),
            _ => return Err(TraceError::EmptyOrDegenerateFile),
        };
        let start_exponent = extract_exponent(first)?;
        let end_exponent = extract_exponent(last)?;
        let y_values: Vec<f64> = rows.into_iter().map(|(_, value)| value).collect();
        let axis = Axis::LogRange {
            start_exponent,
            end_exponent,
            count: y_values.len(),
        };
        Ok((axis, y_values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::read_trace;

    fn read(text: &str, divisor: f64) -> TraceResult<(Axis, Vec<f64>)> {
        read_trace(text.as_bytes(), AcLayout::new(Divisor::new(divisor).unwrap()))
    }

    #[test]
    fn three_decade_sweep() {
        let text = "1.000000e+06 0.5\n1.000000e+07 0.25\n1.000000e+08 0.1\n";
        let (axis, y) = read(text, 1.0).unwrap();
        assert_eq!(
            axis,
            Axis::LogRange {
                start_exponent: 6,
                end_exponent: 8,
                count: 3
            }
        );
        assert_eq!(y, vec![0.5, 0.25, 0.1]);
        assert_eq!(axis.reconstruct(), vec![1e6, 1e7, 1e8]);
    }

    #[test]
    fn extra_columns_are_ignored_and_values_scaled() {
        let text = "1.0e+03  2.0e-03  -90.0\n1.0e+05  4.0e-03  -45.0\n";
        let (_, y) = read(text, 1e-3).unwrap();
        assert!((y[0] - 2.0).abs() < 1e-12);
        assert!((y[1] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn descending_sweep_keeps_direction() {
        let text = "1e+09 1\n1e+08 2\n1e+07 3\n1e+06 4\n";
        let (axis, _) = read(text, 1.0).unwrap();
        let x = axis.reconstruct();
        assert_eq!(x.first().copied(), Some(1e9));
        assert_eq!(x.last().copied(), Some(1e6));
    }

    #[test]
    fn only_endpoints_are_decoded() {
        let text = "1.0e+02 1\nnot-a-frequency 2\n1.0e+04 3\n";
        let (axis, y) = read(text, 1.0).unwrap();
        assert_eq!(axis.len(), 3);
        assert_eq!(y, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn plain_decimal_frequency_fails() {
        let text = "100 1\n1000 2\n";
        let err = read(text, 1.0).unwrap_err();
        assert!(matches!(err, TraceError::ExponentParseFailure(ref t) if t == "100"));
    }

    #[test]
    fn single_row_sweep() {
        let (axis, y) = read("2.2e+03 0.7\n", 1.0).unwrap();
        assert_eq!(axis.reconstruct(), vec![1e3]);
        assert_eq!(y, vec![0.7]);
    }
}
