//! pgfplots/TikZ output, ready to `\input` into a LaTeX document.

use std::fmt::Write;

use tracetex_core::{AxisScale, PlotSeries, SimulationKind};

use crate::Renderer;

/// Renders a series as a `tikzpicture` holding one `axis` environment.
///
/// Coordinates are written with Rust's shortest round-trip float format, so
/// the same series always produces the same bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgfplotsRenderer;

fn axis_labels(kind: SimulationKind) -> (&'static str, &'static str) {
    match kind {
        SimulationKind::Ac => ("Frequency (Hz)", "Magnitude"),
        SimulationKind::Dc => ("Sweep", "Value"),
        SimulationKind::Smith => ("$\\Re(Z)$", "$\\Im(Z)$"),
    }
}

/// Escape characters that are special in LaTeX text mode.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '_' | '%' | '$' | '#' | '&' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Replace control characters with spaces. A line break in a file name would
/// end the `%` header comment and leave the rest of the name as live TeX.
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

impl Renderer for PgfplotsRenderer {
    fn extension(&self) -> &'static str {
        "tex"
    }

    fn render(&self, series: &PlotSeries, title: &str) -> String {
        let title = single_line(title);
        let (xlabel, ylabel) = axis_labels(series.kind);
        let mut options = vec![
            format!("title={{{}}}", escape_latex(&title)),
            format!("xlabel={{{xlabel}}}"),
            format!("ylabel={{{ylabel}}}"),
        ];
        if series.scale == AxisScale::Log {
            options.push("xmode=log".to_string());
            options.push("log basis x={10}".to_string());
        }
        if series.kind == SimulationKind::Smith {
            options.push("axis equal".to_string());
        }
        options.push("grid=major".to_string());

        let mut out = String::new();
        // writing into a String cannot fail
        let _ = writeln!(out, "% {title} ({})", series.kind);
        let _ = writeln!(out, "\\begin{{tikzpicture}}");
        let _ = writeln!(out, "\\begin{{axis}}[");
        for option in &options {
            let _ = writeln!(out, "  {option},");
        }
        let _ = writeln!(out, "]");
        let _ = writeln!(out, "\\addplot [semithick, no markers]");
        let _ = writeln!(out, "table {{%");
        for (x, y) in series.x.iter().zip(&series.y) {
            let _ = writeln!(out, "{x:e} {y:e}");
        }
        let _ = writeln!(out, "}};");
        let _ = writeln!(out, "\\end{{axis}}");
        let _ = writeln!(out, "\\end{{tikzpicture}}");
        out
    }
}
