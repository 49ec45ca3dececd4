use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};

use tracetex_cli::cli::ConfigCommands;
use tracetex_cli::config::{default_config_path, save_config, TracetexConfig};

pub fn handle(config: &TracetexConfig, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
        ConfigCommands::Init { out, force } => {
            let target = resolve_target(out.as_deref())?;
            if target.exists() && !force {
                bail!(
                    "config '{}' already exists; pass --force to overwrite",
                    target.display()
                );
            }
            save_config(&target, &TracetexConfig::default())?;
            println!("Wrote default config to {}", target.display());
            Ok(())
        }
    }
}

fn resolve_target(out: Option<&Path>) -> Result<PathBuf> {
    out.map(Path::to_path_buf)
        .or_else(default_config_path)
        .ok_or_else(|| anyhow!("unable to determine tracetex config path"))
}
