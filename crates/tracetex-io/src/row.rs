//! Whitespace-tolerant row tokenizer.
//!
//! ngspice `wrdata` output pads columns with runs of spaces, and hand-edited
//! files mix in tabs. Rows with fewer than two fields (headers, blank lines,
//! truncated writes) are dropped silently; only a field that should be a
//! number and is not counts as a failure.

use tracetex_core::{TraceError, TraceResult};

/// Minimum number of fields a data row must carry.
pub const MIN_FIELDS: usize = 2;

/// Split a line into fields, or `None` if it is too short to be data.
pub fn tokenize(line: &str) -> Option<Vec<&str>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_FIELDS {
        None
    } else {
        Some(tokens)
    }
}

/// Parse one numeric field; `line` is 1-based and only used for the error.
pub fn parse_number(token: &str, line: usize) -> TraceResult<f64> {
    token.parse::<f64>().map_err(|_| TraceError::MalformedRow {
        line,
        token: token.to_string(),
    })
}

/// Fetch field `index`, reporting a short row instead of panicking.
pub fn field<'a>(
    tokens: &[&'a str],
    index: usize,
    expected: usize,
    line: usize,
) -> TraceResult<&'a str> {
    tokens
        .get(index)
        .copied()
        .ok_or(TraceError::InsufficientColumns {
            line,
            expected,
            found: tokens.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_of_spaces_collapse() {
        assert_eq!(
            tokenize("1.0     2.0"),
            tokenize("1.0 2.0"),
        );
        assert_eq!(tokenize("1.0 2.0").unwrap(), vec!["1.0", "2.0"]);
    }

    #[test]
    fn tabs_and_padding() {
        assert_eq!(
            tokenize("\t 1.000000e+06\t\t 5.0e-01  \r").unwrap(),
            vec!["1.000000e+06", "5.0e-01"]
        );
    }

    #[test]
    fn short_rows_are_skipped() {
        assert!(tokenize("").is_none());
        assert!(tokenize("    ").is_none());
        assert!(tokenize("frequency").is_none());
        assert!(tokenize("42").is_none());
    }

    #[test]
    fn non_numeric_token_fails() {
        assert_eq!(parse_number("2.5e3", 1).unwrap(), 2500.0);
        let err = parse_number("v(out)", 4).unwrap_err();
        assert!(matches!(
            err,
            TraceError::MalformedRow { line: 4, ref token } if token == "v(out)"
        ));
    }

    #[test]
    fn field_out_of_range() {
        let tokens = ["0", "1.0", "2"];
        assert_eq!(field(&tokens, 1, 4, 9).unwrap(), "1.0");
        let err = field(&tokens, 3, 4, 9).unwrap_err();
        assert!(matches!(
            err,
            TraceError::InsufficientColumns { line: 9, expected: 4, found: 3 }
        ));
    }
}
