//! File-name based classification of trace files.
//!
//! The simulator exports carry no header saying what kind of analysis they
//! hold, so the file name decides. Each [`SimulationKind`] owns a marker
//! (`ac`, `dc`, `smith`), matched case-insensitively as a substring of the
//! file stem. Markers are tried in the order of [`MARKERS`]; under
//! [`DispatchPolicy::FirstMatch`] the first hit wins, which means
//! `smith_ac_test.txt` is read as an AC sweep. [`DispatchPolicy::Strict`]
//! refuses such names instead.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracetex_core::{SimulationKind, TraceError, TraceResult};

/// Markers in precedence order.
pub const MARKERS: &[(&str, SimulationKind)] = &[
    ("ac", SimulationKind::Ac),
    ("dc", SimulationKind::Dc),
    ("smith", SimulationKind::Smith),
];

/// How to resolve names that carry several markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// First marker in [`MARKERS`] order wins
    #[default]
    FirstMatch,
    /// Exactly one marker may match
    Strict,
}

/// File stem used for matching (no directories, no extension).
fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// All kinds whose marker appears in the stem, in precedence order.
pub fn candidates(path: &Path) -> Vec<SimulationKind> {
    let stem = stem_of(path).to_lowercase();
    MARKERS
        .iter()
        .filter(|(marker, _)| stem.contains(marker))
        .map(|(_, kind)| *kind)
        .collect()
}

/// Pick the parser for `path`.
pub fn classify(path: &Path, policy: DispatchPolicy) -> TraceResult<SimulationKind> {
    let matches = candidates(path);
    match (matches.as_slice(), policy) {
        ([], _) => Err(TraceError::UnclassifiableFilename(display_name(path))),
        ([only], _) => Ok(*only),
        ([first, ..], DispatchPolicy::FirstMatch) => Ok(*first),
        (many, DispatchPolicy::Strict) => Err(TraceError::AmbiguousFilename {
            name: display_name(path),
            candidates: many.iter().map(|k| k.marker().to_string()).collect(),
        }),
    }
}

/// Whether `path` has the data-file extension (case-insensitive).
pub fn is_data_file(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('.');
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_markers() {
        let policy = DispatchPolicy::FirstMatch;
        assert_eq!(
            classify(Path::new("sweep_ac.txt"), policy).unwrap(),
            SimulationKind::Ac
        );
        assert_eq!(
            classify(Path::new("measure_DC.txt"), policy).unwrap(),
            SimulationKind::Dc
        );
        assert_eq!(
            classify(Path::new("data/Antenna_SMITH.txt"), DispatchPolicy::Strict).unwrap(),
            SimulationKind::Smith
        );
    }

    #[test]
    fn no_marker_is_unclassifiable() {
        let err = classify(Path::new("results.txt"), DispatchPolicy::FirstMatch).unwrap_err();
        assert!(matches!(err, TraceError::UnclassifiableFilename(ref n) if n == "results.txt"));
    }

    #[test]
    fn directories_do_not_classify() {
        let err = classify(Path::new("ac_runs/results.txt"), DispatchPolicy::FirstMatch);
        assert!(err.is_err());
    }

    #[test]
    fn first_match_precedence() {
        assert_eq!(
            classify(Path::new("smith_ac_test.txt"), DispatchPolicy::FirstMatch).unwrap(),
            SimulationKind::Ac
        );
        assert_eq!(
            classify(Path::new("smithac.txt"), DispatchPolicy::FirstMatch).unwrap(),
            SimulationKind::Ac
        );
    }

    #[test]
    fn strict_rejects_ambiguous_names() {
        let err = classify(Path::new("smith_ac_test.txt"), DispatchPolicy::Strict).unwrap_err();
        match err {
            TraceError::AmbiguousFilename { name, candidates } => {
                assert_eq!(name, "smith_ac_test.txt");
                assert_eq!(candidates, vec!["ac".to_string(), "smith".to_string()]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn data_extension_check() {
        assert!(is_data_file(Path::new("a_dc.txt"), "txt"));
        assert!(is_data_file(Path::new("a_dc.TXT"), ".txt"));
        assert!(!is_data_file(Path::new("a_dc.csv"), "txt"));
        assert!(!is_data_file(Path::new("a_dc"), "txt"));
    }
}
