use clap::{CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;
use tracetex_core::Divisor;
use tracetex_viz::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "tracetex", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level (overrides the config file)
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    /// Configuration file (default: <config dir>/tracetex/config.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert every trace file in a directory into a plot artifact
    Render {
        /// Directory holding simulator trace files
        #[arg(value_hint = ValueHint::DirPath)]
        input_dir: Option<PathBuf>,
        /// Directory for the generated artifacts
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        out: Option<PathBuf>,
        /// Divide dependent values by this factor (1e-3 shows milli-units)
        #[arg(long)]
        divisor: Option<Divisor>,
        /// Extension of input data files
        #[arg(long)]
        extension: Option<String>,
        /// Artifact format
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
        /// Refuse file names that carry more than one type marker
        #[arg(long)]
        strict_dispatch: bool,
        /// Descend into subdirectories of the input directory
        #[arg(long)]
        recursive: bool,
        /// Worker threads (1 = sequential, 0 = all cores)
        #[arg(long)]
        threads: Option<usize>,
        /// Write batch_manifest.json into the output directory
        #[arg(long)]
        manifest: bool,
    },
    /// Parse a single trace file and print a JSON summary
    Inspect {
        /// Trace file to inspect
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Divide dependent values by this factor
        #[arg(long)]
        divisor: Option<Divisor>,
        /// Refuse file names that carry more than one type marker
        #[arg(long)]
        strict_dispatch: bool,
    },
    /// Configuration helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Write a default configuration file
    Init {
        /// Target path (default: <config dir>/tracetex/config.toml)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    /// pgfplots/TikZ picture
    Tex,
    /// JSON plot series
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Tex => OutputFormat::Tex,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
