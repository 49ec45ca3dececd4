//! Decade exponent recovery from scientific-notation tokens.
//!
//! Only the exponent survives: `1.0e+06` and `9.9e+06` both map to 6. That is
//! acceptable for the first and last row of a monotonic sweep, whose full axis
//! is regenerated by uniform log spacing rather than replayed from samples.

use tracetex_core::{TraceError, TraceResult};

/// Integer exponent of a token such as `"1.000000e+06"`.
///
/// Splits at the last `e`/`E` and parses what follows as a signed or
/// unsigned integer. The mantissa is not inspected.
pub fn extract_exponent(token: &str) -> TraceResult<i32> {
    let (_, exponent) = token
        .rsplit_once(['e', 'E'])
        .ok_or_else(|| TraceError::ExponentParseFailure(token.to_string()))?;
    exponent
        .parse::<i32>()
        .map_err(|_| TraceError::ExponentParseFailure(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_exponents() {
        assert_eq!(extract_exponent("2.500000e+09").unwrap(), 9);
        assert_eq!(extract_exponent("1.000000e+06").unwrap(), 6);
        assert_eq!(extract_exponent("9.9e6").unwrap(), 6);
    }

    #[test]
    fn negative_exponent() {
        assert_eq!(extract_exponent("1.0e-03").unwrap(), -3);
        assert_eq!(extract_exponent("4.7E-12").unwrap(), -12);
    }

    #[test]
    fn mantissa_is_discarded() {
        assert_eq!(
            extract_exponent("1.0e+06").unwrap(),
            extract_exponent("9.9e+06").unwrap()
        );
    }

    #[test]
    fn rejects_tokens_without_exponent() {
        for bad in ["notanumber", "1000000", "1.0e", "1.0e+", "1.0e+6.5", ""] {
            assert!(
                matches!(extract_exponent(bad), Err(TraceError::ExponentParseFailure(ref t)) if t == bad),
                "{bad} should fail"
            );
        }
    }
}
