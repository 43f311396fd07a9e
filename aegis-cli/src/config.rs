use std::path::{Path, PathBuf};

use aegis_core::AegisConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
    /// Write a config file populated with the defaults
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

/// Config file location: `--config`, else `$AEGIS_CONFIG`, else ~/.aegis/config.toml
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(AegisConfig::config_path)
}

/// Load the effective configuration, defaults when the file is absent
pub fn load_config(explicit: Option<&Path>) -> Result<AegisConfig> {
    let path = resolve_path(explicit);
    AegisConfig::load_from(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

pub fn run_config(args: ConfigArgs, explicit: Option<&Path>) -> Result<()> {
    match args.command {
        ConfigCommands::Path => run_path(explicit),
        ConfigCommands::Show => run_show(explicit),
        ConfigCommands::Init(args) => run_init(args, explicit),
    }
}

fn run_path(explicit: Option<&Path>) -> Result<()> {
    let path = resolve_path(explicit);
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; defaults are in effect)");
    }
    Ok(())
}

fn run_show(explicit: Option<&Path>) -> Result<()> {
    let config = load_config(explicit)?;
    let toml_str = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    print!("{}", toml_str);
    Ok(())
}

fn run_init(args: InitArgs, explicit: Option<&Path>) -> Result<()> {
    let config_path = resolve_path(explicit);

    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    AegisConfig::default()
        .save_to(&config_path)
        .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

    println!("✅ Created config at: {:?}", config_path);
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {:?}", config_path);
    println!("  2. Run: aegis config show");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        run_init(InitArgs { force: false }, Some(&path)).unwrap();
        assert!(path.exists());
        assert!(run_init(InitArgs { force: false }, Some(&path)).is_err());
        run_init(InitArgs { force: true }, Some(&path)).unwrap();
    }

    #[test]
    fn test_load_config_reports_path_on_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
    }
}
