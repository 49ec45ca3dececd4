use clap::Parser;
use std::process::ExitCode;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use tracetex_cli::{
    cli::{Cli, Commands},
    config::{load_config, TracetexConfig},
};

mod commands;
use commands::render::RenderArgs;

fn run(cli: Cli, config: TracetexConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Render {
            input_dir,
            out,
            divisor,
            extension,
            format,
            strict_dispatch,
            recursive,
            threads,
            manifest,
        } => commands::render::handle(
            &config,
            RenderArgs {
                input_dir,
                out,
                divisor,
                extension,
                format,
                strict_dispatch,
                recursive,
                threads,
                manifest,
            },
        ),
        Commands::Inspect {
            file,
            divisor,
            strict_dispatch,
        } => commands::inspect::handle(&config, &file, divisor, strict_dispatch),
        Commands::Config { command } => commands::config::handle(&config, &command),
        Commands::Completions { shell, out } => commands::completions::handle(shell, out.as_deref()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("tracetex: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let level = cli
        .log_level
        .or_else(|| config.logging.tracing_level().ok())
        .unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracetex: a global tracing subscriber is already installed");
    }

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
