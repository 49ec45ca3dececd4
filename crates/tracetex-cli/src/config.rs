//! Configuration file handling.
//! Settings live in `<config dir>/tracetex/config.toml` unless `--config` points elsewhere.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracetex_core::Divisor;
use tracetex_io::DispatchPolicy;
use tracetex_viz::OutputFormat;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TracetexConfig {
    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,
    /// Parsing settings
    #[serde(default)]
    pub parse: ParseConfig,
    /// Artifact settings
    #[serde(default)]
    pub render: RenderConfig,
    /// Batch execution settings
    #[serde(default)]
    pub batch: BatchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory scanned for trace files
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    /// Directory artifacts are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Extension of input data files
    #[serde(default = "default_data_extension")]
    pub data_extension: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            data_extension: default_data_extension(),
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("simulation_data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("tex_files")
}

fn default_data_extension() -> String {
    "txt".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ParseConfig {
    /// Divisor for dependent values; must be finite and non-zero
    #[serde(default)]
    pub divisor: Divisor,
    /// Reject file names with more than one type marker
    #[serde(default)]
    pub strict_dispatch: bool,
}

impl ParseConfig {
    pub fn policy(&self) -> DispatchPolicy {
        if self.strict_dispatch {
            DispatchPolicy::Strict
        } else {
            DispatchPolicy::FirstMatch
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RenderConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Worker threads (1 = sequential, 0 = all cores)
    #[serde(default = "default_threads")]
    pub threads: usize,
    #[serde(default)]
    pub recursive: bool,
    /// Write batch_manifest.json next to the artifacts
    #[serde(default)]
    pub manifest: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            recursive: false,
            manifest: false,
        }
    }
}

fn default_threads() -> usize {
    1
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    pub fn tracing_level(&self) -> Result<tracing::Level> {
        self.level
            .parse()
            .map_err(|_| anyhow!("invalid log level '{}' in config", self.level))
    }
}

/// Default location of the configuration file.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tracetex").join("config.toml"))
}

/// Load configuration.
///
/// An explicit path must exist. Without one, the default location is used if
/// present, otherwise built-in defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<TracetexConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(TracetexConfig::default()),
        },
    };
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config '{}'", path.display()))?;
    parse_config(&contents).with_context(|| format!("parsing config '{}'", path.display()))
}

pub fn parse_config(contents: &str) -> Result<TracetexConfig> {
    let config: TracetexConfig = toml::from_str(contents)?;
    config.logging.tracing_level()?;
    Ok(config)
}

/// Write `config` to `path`, creating parent directories.
pub fn save_config(path: &Path, config: &TracetexConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating config directory '{}'", dir.display()))?;
    }
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)
        .with_context(|| format!("writing config '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.paths.input_dir, PathBuf::from("simulation_data"));
        assert_eq!(config.paths.output_dir, PathBuf::from("tex_files"));
        assert_eq!(config.parse.divisor, Divisor::IDENTITY);
        assert_eq!(config.parse.policy(), DispatchPolicy::FirstMatch);
        assert_eq!(config.render.format, OutputFormat::Tex);
        assert_eq!(config.batch.threads, 1);
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse_config(
            r#"
[paths]
output_dir = "plots"

[parse]
divisor = 0.001
strict_dispatch = true

[render]
format = "json"

[logging]
level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(config.paths.output_dir, PathBuf::from("plots"));
        assert_eq!(config.paths.data_extension, "txt");
        assert_eq!(config.parse.divisor.value(), 0.001);
        assert_eq!(config.parse.policy(), DispatchPolicy::Strict);
        assert_eq!(config.render.format, OutputFormat::Json);
        assert_eq!(config.logging.tracing_level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn zero_divisor_is_rejected() {
        assert!(parse_config("[parse]\ndivisor = 0.0\n").is_err());
    }

    #[test]
    fn bad_log_level_is_rejected() {
        assert!(parse_config("[logging]\nlevel = \"loud\"\n").is_err());
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");
        let mut config = TracetexConfig::default();
        config.batch.manifest = true;
        save_config(&path, &config).unwrap();
        let loaded = load_config(Some(&path)).unwrap();
        assert!(loaded.batch.manifest);
    }

    #[test]
    fn explicit_missing_path_fails() {
        let tmp = tempdir().unwrap();
        assert!(load_config(Some(&tmp.path().join("absent.toml"))).is_err());
    }
}
