//! Configuration inspection and initialization.

use anyhow::Context;
use clap::Args;
use sala_config::{AnalysisConfig, default_config_path, ensure_user_config_dir};
use std::path::Path;

use super::common::load_config;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write default settings to the user config file
    #[arg(long)]
    init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    force: bool,
}

pub fn run(args: ConfigArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    if args.init {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => {
                ensure_user_config_dir()?;
                default_config_path()
            }
        };
        if path.exists() && !args.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }
        AnalysisConfig::default()
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let config = load_config(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}
