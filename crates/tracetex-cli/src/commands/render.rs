use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use tabwriter::TabWriter;
use tracing::info;

use tracetex_batch::{
    discover_jobs, run_batch, BatchRunnerConfig, BatchSummary, DiscoveryOptions, JobStatus,
};
use tracetex_cli::{config::TracetexConfig, FormatArg};
use tracetex_core::Divisor;
use tracetex_io::DispatchPolicy;
use tracetex_viz::OutputFormat;

/// Command-line overrides for a render run; `None` falls back to config.
pub struct RenderArgs {
    pub input_dir: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub divisor: Option<Divisor>,
    pub extension: Option<String>,
    pub format: Option<FormatArg>,
    pub strict_dispatch: bool,
    pub recursive: bool,
    pub threads: Option<usize>,
    pub manifest: bool,
}

pub fn handle(config: &TracetexConfig, args: RenderArgs) -> Result<()> {
    let input_root = args
        .input_dir
        .unwrap_or_else(|| config.paths.input_dir.clone());
    let output_root = args.out.unwrap_or_else(|| config.paths.output_dir.clone());
    let policy = if args.strict_dispatch {
        DispatchPolicy::Strict
    } else {
        config.parse.policy()
    };
    let format = args
        .format
        .map(OutputFormat::from)
        .unwrap_or(config.render.format);

    let discovery = DiscoveryOptions {
        recursive: args.recursive || config.batch.recursive,
    };
    let jobs = discover_jobs(&input_root, &discovery)?;
    info!(
        "Rendering {} file(s) from {} into {}",
        jobs.len(),
        input_root.display(),
        output_root.display()
    );

    let batch = BatchRunnerConfig {
        jobs,
        input_root,
        output_root,
        data_extension: args
            .extension
            .unwrap_or_else(|| config.paths.data_extension.clone()),
        divisor: args.divisor.unwrap_or(config.parse.divisor),
        policy,
        format,
        threads: args.threads.unwrap_or(config.batch.threads),
        write_manifest: args.manifest || config.batch.manifest,
    };
    let summary = run_batch(&batch)?;
    print_summary(&summary)
}

fn print_summary(summary: &BatchSummary) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "FILE\tKIND\tSTATUS\tDETAIL")?;
    for job in &summary.jobs {
        let kind = job.kind.map(|k| k.marker()).unwrap_or("-");
        let detail = match job.status {
            JobStatus::Ok => job.output.clone().unwrap_or_default(),
            JobStatus::Skipped | JobStatus::Error => job
                .error
                .clone()
                .or_else(|| job.error_kind.clone())
                .unwrap_or_default(),
        };
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            job.job_id,
            kind,
            job.status.as_str(),
            detail
        )?;
    }
    writer.flush()?;

    println!(
        "Rendered {} file(s): {} created, {} skipped, {} failed",
        summary.jobs.len(),
        summary.success,
        summary.skipped,
        summary.failure
    );
    if let Some(path) = &summary.manifest_path {
        println!("Batch manifest written to {}", path.display());
    }
    Ok(())
}
