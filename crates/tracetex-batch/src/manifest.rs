use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::job::{tally, JobRecord};

/// File name of the run report inside the output root.
pub const MANIFEST_FILE: &str = "batch_manifest.json";

/// Run report written next to the artifacts.
#[derive(Debug, Serialize)]
pub struct BatchManifest {
    pub created_at: DateTime<Utc>,
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub num_jobs: usize,
    pub success: usize,
    pub skipped: usize,
    pub failure: usize,
    /// In discovery order, whatever order the workers finished in
    pub jobs: Vec<JobRecord>,
}

impl BatchManifest {
    pub fn new(input_root: &Path, output_root: &Path, jobs: Vec<JobRecord>) -> Self {
        let (success, skipped, failure) = tally(&jobs);
        Self {
            created_at: Utc::now(),
            input_root: input_root.to_path_buf(),
            output_root: output_root.to_path_buf(),
            num_jobs: jobs.len(),
            success,
            skipped,
            failure,
            jobs,
        }
    }

    /// Where [`write_batch_manifest`] puts this manifest.
    pub fn path(&self) -> PathBuf {
        self.output_root.join(MANIFEST_FILE)
    }
}

/// Write `manifest` into its output root and return the file path.
pub fn write_batch_manifest(manifest: &BatchManifest) -> Result<PathBuf> {
    let path = manifest.path();
    fs::create_dir_all(&manifest.output_root).with_context(|| {
        format!(
            "creating output root '{}' for the batch manifest",
            manifest.output_root.display()
        )
    })?;
    let file = File::create(&path)
        .with_context(|| format!("creating batch manifest '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, manifest).with_context(|| {
        format!(
            "serializing batch manifest for '{}'",
            manifest.input_root.display()
        )
    })?;
    writer.write_all(b"\n")?;
    writer
        .flush()
        .with_context(|| format!("writing batch manifest '{}'", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobStatus;
    use tempfile::tempdir;
    use tracetex_core::SimulationKind;

    fn record(job_id: &str, status: JobStatus) -> JobRecord {
        JobRecord {
            job_id: job_id.into(),
            input: format!("simulation_data/{job_id}"),
            status,
            kind: (status == JobStatus::Ok).then_some(SimulationKind::Ac),
            samples: None,
            output: None,
            error_kind: (status != JobStatus::Ok).then(|| "malformed_row".to_string()),
            error: None,
        }
    }

    #[test]
    fn manifest_lands_in_output_root_with_counts() {
        let tmp = tempdir().unwrap();
        let output_root = tmp.path().join("tex_files");
        let manifest = BatchManifest::new(
            Path::new("simulation_data"),
            &output_root,
            vec![
                record("z_ac.txt", JobStatus::Ok),
                record("a_dc.txt", JobStatus::Error),
                record("results.txt", JobStatus::Skipped),
            ],
        );
        assert_eq!(manifest.num_jobs, 3);

        let path = write_batch_manifest(&manifest).unwrap();
        assert_eq!(path, output_root.join(MANIFEST_FILE));

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("}\n"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["success"], 1);
        assert_eq!(value["failure"], 1);
        assert_eq!(value["skipped"], 1);
        assert_eq!(value["input_root"], "simulation_data");
        let ids: Vec<&str> = value["jobs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|job| job["job_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["z_ac.txt", "a_dc.txt", "results.txt"]);
        assert_eq!(value["jobs"][0]["kind"], "ac");
    }
}
