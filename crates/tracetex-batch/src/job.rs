use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracetex_core::SimulationKind;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// One input file queued for processing.
#[derive(Debug, Clone)]
pub struct TraceJob {
    pub job_id: String,
    pub input: PathBuf,
}

impl TraceJob {
    pub fn new(input: PathBuf) -> Self {
        let job_id = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());
        Self { job_id, input }
    }

    /// Dot-prefixed file name (editor backups, `.DS_Store`, ...).
    pub fn is_hidden(&self) -> bool {
        self.job_id.starts_with('.')
    }
}

/// Outcome class of a job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Artifact written
    Ok,
    /// Not a data file or no type marker; no parser ran
    Skipped,
    /// Parsing or writing failed
    Error,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Ok => "ok",
            JobStatus::Skipped => "skipped",
            JobStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: String,
    pub input: String,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SimulationKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Count `(ok, skipped, error)` records.
pub fn tally(records: &[JobRecord]) -> (usize, usize, usize) {
    let count = |status: JobStatus| records.iter().filter(|r| r.status == status).count();
    (
        count(JobStatus::Ok),
        count(JobStatus::Skipped),
        count(JobStatus::Error),
    )
}

/// How input files are enumerated.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Descend into subdirectories
    pub recursive: bool,
}

/// List every regular file under `root`, sorted by path.
///
/// Non-data and hidden files are returned too; the runner reports them as
/// skipped so the user sees why nothing was produced for them. Hidden
/// directories are not entered.
pub fn discover_jobs(root: &Path, options: &DiscoveryOptions) -> Result<Vec<TraceJob>> {
    if !root.is_dir() {
        return Err(anyhow!(
            "input directory '{}' does not exist or is not a directory",
            root.display()
        ));
    }

    let mut walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
    if !options.recursive {
        walker = walker.max_depth(1);
    }

    let mut jobs = Vec::new();
    for entry in walker.into_iter().filter_entry(should_enter) {
        let entry = entry.with_context(|| format!("walking '{}'", root.display()))?;
        if entry.file_type().is_file() {
            jobs.push(TraceJob::new(entry.into_path()));
        }
    }
    Ok(jobs)
}

fn should_enter(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    let hidden = entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false);
    if hidden {
        debug!(dir = %entry.path().display(), "not descending into hidden directory");
    }
    !hidden
}
