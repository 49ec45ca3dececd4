//! The parsed form of one simulator trace file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::axis::{Axis, AxisScale};
use crate::error::{TraceError, TraceResult};

/// Simulation type a trace file was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationKind {
    /// Frequency-domain sweep, log-spaced frequency axis
    Ac,
    /// Linearly swept operating point
    Dc,
    /// Complex impedance, real part against imaginary part
    Smith,
}

impl SimulationKind {
    /// All kinds, in dispatch precedence order.
    pub const ALL: &'static [SimulationKind] =
        &[SimulationKind::Ac, SimulationKind::Dc, SimulationKind::Smith];

    /// File-name marker selecting this kind.
    pub fn marker(&self) -> &'static str {
        match self {
            SimulationKind::Ac => "ac",
            SimulationKind::Dc => "dc",
            SimulationKind::Smith => "smith",
        }
    }

    /// Human-readable name.
    pub fn friendly_name(&self) -> &'static str {
        match self {
            SimulationKind::Ac => "AC sweep",
            SimulationKind::Dc => "DC sweep",
            SimulationKind::Smith => "Smith chart",
        }
    }

    /// Scale of the independent axis when rendered.
    pub fn axis_scale(&self) -> AxisScale {
        match self {
            SimulationKind::Ac => AxisScale::Log,
            SimulationKind::Dc | SimulationKind::Smith => AxisScale::Linear,
        }
    }
}

impl std::fmt::Display for SimulationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.friendly_name())
    }
}

/// Derive the artifact path for an input file: `<output_dir>/<stem>.<extension>`.
pub fn output_target_for(source: &Path, output_dir: &Path, extension: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trace".to_string());
    output_dir.join(format!("{stem}.{extension}"))
}

/// Everything the renderer needs: both axes plus the scale hint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSeries {
    pub kind: SimulationKind,
    pub scale: AxisScale,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Parsed trace, immutable once built.
///
/// `sample_count()` always equals `y_values().len()`, and an explicit axis
/// always has the same length as `y_values`. AC records keep only the
/// compressed [`Axis::LogRange`]; the concrete frequencies exist only inside
/// the [`PlotSeries`] built at render time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRecord {
    source: PathBuf,
    output_target: PathBuf,
    kind: SimulationKind,
    axis: Axis,
    y_values: Vec<f64>,
}

impl SimulationRecord {
    /// Build a record, checking that the axis and samples line up.
    pub fn new(
        source: PathBuf,
        output_target: PathBuf,
        kind: SimulationKind,
        axis: Axis,
        y_values: Vec<f64>,
    ) -> TraceResult<Self> {
        let inconsistent = |reason: String| TraceError::InconsistentRecord {
            kind: kind.friendly_name().to_string(),
            reason,
        };
        if axis.len() != y_values.len() {
            return Err(inconsistent(format!(
                "axis has {} samples but {} dependent values were read",
                axis.len(),
                y_values.len()
            )));
        }
        if axis.natural_scale() != kind.axis_scale() {
            return Err(inconsistent(format!(
                "expected a {} axis, got a {} one",
                kind.axis_scale().as_str(),
                axis.natural_scale().as_str()
            )));
        }
        Ok(Self {
            source,
            output_target,
            kind,
            axis,
            y_values,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn output_target(&self) -> &Path {
        &self.output_target
    }

    pub fn kind(&self) -> SimulationKind {
        self.kind
    }

    pub fn axis(&self) -> &Axis {
        &self.axis
    }

    /// Explicit independent values; `None` for AC records.
    pub fn x_values(&self) -> Option<&[f64]> {
        self.axis.explicit_values()
    }

    pub fn y_values(&self) -> &[f64] {
        &self.y_values
    }

    /// Decade of the first swept frequency, 0 for non-AC records.
    pub fn start_exponent(&self) -> i32 {
        match self.axis {
            Axis::LogRange { start_exponent, .. } => start_exponent,
            Axis::Explicit { .. } => 0,
        }
    }

    /// Decade of the last swept frequency, 0 for non-AC records.
    pub fn end_exponent(&self) -> i32 {
        match self.axis {
            Axis::LogRange { end_exponent, .. } => end_exponent,
            Axis::Explicit { .. } => 0,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.y_values.len()
    }

    /// Stem of the input file, used as plot title.
    pub fn title(&self) -> String {
        self.source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Materialize the series for rendering, reconstructing the AC axis.
    pub fn plot_series(&self) -> PlotSeries {
        PlotSeries {
            kind: self.kind,
            scale: self.kind.axis_scale(),
            x: self.axis.reconstruct(),
            y: self.y_values.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ac_record() -> SimulationRecord {
        SimulationRecord::new(
            PathBuf::from("simulation_data/sweep_ac.txt"),
            PathBuf::from("tex_files/sweep_ac.tex"),
            SimulationKind::Ac,
            Axis::LogRange {
                start_exponent: 6,
                end_exponent: 8,
                count: 3,
            },
            vec![0.5, 0.25, 0.1],
        )
        .unwrap()
    }

    #[test]
    fn output_target_keeps_stem() {
        let target = output_target_for(
            Path::new("simulation_data/measure_dc.txt"),
            Path::new("tex_files"),
            "tex",
        );
        assert_eq!(target, PathBuf::from("tex_files/measure_dc.tex"));
    }

    #[test]
    fn ac_record_accessors() {
        let record = ac_record();
        assert!(record.x_values().is_none());
        assert_eq!(record.start_exponent(), 6);
        assert_eq!(record.end_exponent(), 8);
        assert_eq!(record.sample_count(), 3);
        assert_eq!(record.title(), "sweep_ac");
    }

    #[test]
    fn plot_series_reconstructs_log_axis() {
        let series = ac_record().plot_series();
        assert_eq!(series.x, vec![1e6, 1e7, 1e8]);
        assert_eq!(series.y, vec![0.5, 0.25, 0.1]);
        assert_eq!(series.scale, AxisScale::Log);
    }

    #[test]
    fn explicit_record_defaults_exponents() {
        let record = SimulationRecord::new(
            PathBuf::from("measure_dc.txt"),
            PathBuf::from("out/measure_dc.tex"),
            SimulationKind::Dc,
            Axis::explicit(vec![0.0, 1.0]),
            vec![2.0, 3.0],
        )
        .unwrap();
        assert_eq!(record.x_values(), Some(&[0.0, 1.0][..]));
        assert_eq!(record.start_exponent(), 0);
        assert_eq!(record.end_exponent(), 0);
        assert_eq!(record.plot_series().scale, AxisScale::Linear);
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = SimulationRecord::new(
            PathBuf::from("a_dc.txt"),
            PathBuf::from("a_dc.tex"),
            SimulationKind::Dc,
            Axis::explicit(vec![0.0]),
            vec![1.0, 2.0],
        )
        .unwrap_err();
        assert!(matches!(err, TraceError::InconsistentRecord { .. }));
        assert_eq!(err.kind_label(), "inconsistent_record");
    }

    #[test]
    fn axis_shape_must_match_kind() {
        let log_range = Axis::LogRange {
            start_exponent: 0,
            end_exponent: 1,
            count: 2,
        };
        for kind in [SimulationKind::Dc, SimulationKind::Smith] {
            let err = SimulationRecord::new(
                PathBuf::from("a.txt"),
                PathBuf::from("a.tex"),
                kind,
                log_range.clone(),
                vec![1.0, 2.0],
            )
            .unwrap_err();
            assert!(matches!(err, TraceError::InconsistentRecord { .. }), "{kind}");
        }

        let err = SimulationRecord::new(
            PathBuf::from("a_ac.txt"),
            PathBuf::from("a_ac.tex"),
            SimulationKind::Ac,
            Axis::explicit(vec![1.0, 10.0]),
            vec![1.0, 2.0],
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("inconsistent AC sweep record"));
    }
}
