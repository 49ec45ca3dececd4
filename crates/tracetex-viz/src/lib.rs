//! Plot artifact rendering for parsed traces.
//!
//! A [`Renderer`] turns a [`PlotSeries`] into the text of one output file.
//! [`PgfplotsRenderer`] is the default and writes a TikZ picture for LaTeX
//! documents; [`JsonRenderer`] dumps the same series for other tooling.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracetex_core::PlotSeries;

pub mod pgfplots;

pub use pgfplots::PgfplotsRenderer;

/// Turns a plot series into artifact text.
pub trait Renderer: Send + Sync {
    /// File extension of the artifact, without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, series: &PlotSeries, title: &str) -> String;
}

/// Series serialized as pretty JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonPlot<'a> {
    title: &'a str,
    #[serde(flatten)]
    series: &'a PlotSeries,
}

impl Renderer for JsonRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, series: &PlotSeries, title: &str) -> String {
        let plot = JsonPlot { title, series };
        // PlotSeries holds only numbers and enums; NaN/inf become null
        let mut text = serde_json::to_string_pretty(&plot).unwrap_or_default();
        text.push('\n');
        text
    }
}

/// Output format selector used by configuration and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Tex,
    Json,
}

impl OutputFormat {
    pub fn renderer(&self) -> Box<dyn Renderer> {
        match self {
            OutputFormat::Tex => Box::new(PgfplotsRenderer),
            OutputFormat::Json => Box::new(JsonRenderer),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Tex => "tex",
            OutputFormat::Json => "json",
        }
    }
}

/// Write artifact text, creating the parent directory on demand.
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory '{}'", parent.display()))?;
        }
    }
    fs::write(path, contents).with_context(|| format!("writing artifact '{}'", path.display()))?;
    Ok(())
}
