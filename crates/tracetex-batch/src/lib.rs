pub mod job;
pub mod manifest;
pub mod runner;

pub use job::{discover_jobs, tally, DiscoveryOptions, JobRecord, JobStatus, TraceJob};
pub use manifest::{write_batch_manifest, BatchManifest, MANIFEST_FILE};
pub use runner::{run_batch, BatchRunnerConfig, BatchSummary};
