use crate::job::{tally, JobRecord, JobStatus, TraceJob};
use crate::manifest::{write_batch_manifest, BatchManifest};
use anyhow::{Context, Result};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracetex_core::{output_target_for, Divisor, SimulationRecord, TraceError};
use tracetex_io::{classify, is_data_file, load_record, DispatchPolicy, ParseOptions};
use tracetex_viz::{write_artifact, OutputFormat, Renderer};
use tracing::{error, info, warn};

/// Everything a batch run needs besides the job list.
pub struct BatchRunnerConfig {
    pub jobs: Vec<TraceJob>,
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    /// Extension input files must carry, without the dot
    pub data_extension: String,
    pub divisor: Divisor,
    pub policy: DispatchPolicy,
    pub format: OutputFormat,
    /// 1 = sequential, 0 = one worker per CPU
    pub threads: usize,
    pub write_manifest: bool,
}

/// Per-run counts plus every job record, in discovery order.
pub struct BatchSummary {
    pub success: usize,
    pub skipped: usize,
    pub failure: usize,
    pub manifest_path: Option<PathBuf>,
    pub jobs: Vec<JobRecord>,
}

pub fn run_batch(config: &BatchRunnerConfig) -> Result<BatchSummary> {
    let renderer = config.format.renderer();
    let options = ParseOptions {
        divisor: config.divisor,
        output_dir: config.output_root.clone(),
        output_extension: renderer.extension().to_string(),
    };
    if !config.divisor.is_identity() {
        info!(divisor = %config.divisor, "dividing dependent values");
    }

    let claims = claim_targets(config, &options);

    let thread_count = if config.threads == 0 {
        num_cpus::get()
    } else {
        config.threads
    };

    // targets are claimed up front, so no two workers write the same file
    let job_records: Vec<JobRecord> = if thread_count <= 1 {
        config
            .jobs
            .iter()
            .zip(&claims)
            .map(|(job, claim)| run_job(job, claim, config, &options, renderer.as_ref()))
            .collect()
    } else {
        let pool = ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .build()
            .context("building Rayon thread pool for batch runs")?;
        pool.install(|| {
            config
                .jobs
                .par_iter()
                .zip(claims.par_iter())
                .map(|(job, claim)| run_job(job, claim, config, &options, renderer.as_ref()))
                .collect()
        })
    };

    let (success, skipped, failure) = tally(&job_records);

    let manifest_path = if config.write_manifest {
        let manifest =
            BatchManifest::new(&config.input_root, &config.output_root, job_records.clone());
        Some(write_batch_manifest(&manifest)?)
    } else {
        None
    };

    Ok(BatchSummary {
        success,
        skipped,
        failure,
        manifest_path,
        jobs: job_records,
    })
}

/// Ownership of a job's output target.
#[derive(Debug, Clone, PartialEq)]
enum TargetClaim {
    /// Job is skipped before parsing, so it never writes
    Unclaimed,
    /// First job in discovery order to map onto its target
    Owner,
    /// Target already belongs to this earlier input
    TakenBy(PathBuf),
}

/// Assign every output target to the first job, in discovery order, that
/// would write it. Files sharing a stem (`a/x_ac.txt` and `b/x_ac.txt`, or
/// `x_ac.txt` and `x_ac.TXT`) otherwise overwrite each other.
fn claim_targets(config: &BatchRunnerConfig, options: &ParseOptions) -> Vec<TargetClaim> {
    let mut owners: HashMap<PathBuf, &Path> = HashMap::new();
    config
        .jobs
        .iter()
        .map(|job| {
            if job.is_hidden()
                || !is_data_file(&job.input, &config.data_extension)
                || classify(&job.input, config.policy).is_err()
            {
                return TargetClaim::Unclaimed;
            }
            let target =
                output_target_for(&job.input, &options.output_dir, &options.output_extension);
            match owners.entry(target) {
                Entry::Occupied(owner) => TargetClaim::TakenBy(owner.get().to_path_buf()),
                Entry::Vacant(slot) => {
                    slot.insert(&job.input);
                    TargetClaim::Owner
                }
            }
        })
        .collect()
}

/// Process one file: classify, parse, render, write.
///
/// Never fails: every outcome, including errors, becomes a [`JobRecord`] so
/// one bad file cannot stop the batch.
fn run_job(
    job: &TraceJob,
    claim: &TargetClaim,
    config: &BatchRunnerConfig,
    options: &ParseOptions,
    renderer: &dyn Renderer,
) -> JobRecord {
    let mut record = JobRecord {
        job_id: job.job_id.clone(),
        input: job.input.display().to_string(),
        status: JobStatus::Skipped,
        kind: None,
        samples: None,
        output: None,
        error_kind: None,
        error: None,
    };

    if job.is_hidden() {
        warn!(file = %job.input.display(), "hidden file, skipping");
        record.error_kind = Some("hidden_file".to_string());
        return record;
    }

    if !is_data_file(&job.input, &config.data_extension) {
        warn!(
            file = %job.job_id,
            "not a .{} file, skipping",
            config.data_extension.trim_start_matches('.')
        );
        record.error_kind = Some("not_a_data_file".to_string());
        return record;
    }

    if let TargetClaim::TakenBy(owner) = claim {
        let target = output_target_for(&job.input, &options.output_dir, &options.output_extension);
        let message = format!(
            "output '{}' is already produced by '{}'",
            target.display(),
            owner.display()
        );
        error!(file = %job.input.display(), "{message}");
        record.status = JobStatus::Error;
        record.error_kind = Some("output_collision".to_string());
        record.error = Some(message);
        return record;
    }

    info!(file = %job.job_id, "reading simulation data");
    let trace = match load_record(&job.input, config.policy, options) {
        Ok(trace) => trace,
        Err(err) => {
            fail(&mut record, &err);
            return record;
        }
    };

    record.kind = Some(trace.kind());
    record.samples = Some(trace.sample_count());
    match export(&trace, renderer) {
        Ok(path) => {
            info!(file = %job.job_id, output = %path.display(), "artifact created");
            record.status = JobStatus::Ok;
            record.output = Some(path.display().to_string());
        }
        Err(err) => {
            error!(file = %job.job_id, "export failed: {err:#}");
            record.status = JobStatus::Error;
            record.error_kind = Some("export".to_string());
            record.error = Some(format!("{err:#}"));
        }
    }
    record
}

fn fail(record: &mut JobRecord, err: &TraceError) {
    if err.is_classification() {
        warn!(file = %record.job_id, "skipping: {err}");
        record.status = JobStatus::Skipped;
    } else {
        error!(file = %record.job_id, "problem reading file, skipping: {err}");
        record.status = JobStatus::Error;
    }
    record.error_kind = Some(err.kind_label().to_string());
    record.error = Some(err.to_string());
}

fn export(trace: &SimulationRecord, renderer: &dyn Renderer) -> Result<PathBuf> {
    let contents = renderer.render(&trace.plot_series(), &trace.title());
    let path = trace.output_target().to_path_buf();
    write_artifact(&path, &contents)?;
    Ok(path)
}
