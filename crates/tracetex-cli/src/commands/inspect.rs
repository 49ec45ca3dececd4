use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use tracetex_cli::config::TracetexConfig;
use tracetex_core::Divisor;
use tracetex_io::{load_record, DispatchPolicy, ParseOptions, TraceSummary};

pub fn handle(
    config: &TracetexConfig,
    file: &Path,
    divisor: Option<Divisor>,
    strict_dispatch: bool,
) -> Result<()> {
    let policy = if strict_dispatch {
        DispatchPolicy::Strict
    } else {
        config.parse.policy()
    };
    let options = ParseOptions {
        divisor: divisor.unwrap_or(config.parse.divisor),
        output_dir: config.paths.output_dir.clone(),
        output_extension: config.render.format.extension().to_string(),
    };
    info!("Inspecting {}", file.display());
    let record = load_record(file, policy, &options)
        .with_context(|| format!("reading trace '{}'", file.display()))?;
    let summary = TraceSummary::from_record(&record);
    serde_json::to_writer_pretty(io::stdout(), &summary)
        .context("serializing trace summary to JSON")?;
    println!();
    Ok(())
}
