//! aegis CLI - terminal dashboard for public-health and civic intelligence
//!
//! This is the main entry point for the `aegis` binary, which provides:
//! - The interactive dashboard (`run`, the default)
//! - One-shot conversation and search queries (`ask`, `search`)
//! - Module registry listing (`modules`)
//! - Configuration helpers (`config`) and shell completions

use std::path::PathBuf;

use aegis_core::Module;
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod tracing_setup;
mod tui;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "aegis",
    author,
    version,
    about = "AEGIS public-health and civic intelligence dashboard",
    long_about = "Navigate overview, health, governance, climate and search modules, talk to the \
                  AI assistant and search research sources from the terminal."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces to an OTLP endpoint (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    /// Config file (default: ~/.aegis/config.toml)
    #[arg(long, global = true, value_name = "PATH", env = "AEGIS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive dashboard (default)
    Run(RunArgs),
    /// Ask the assistant one question and print the exchange
    Ask(commands::ask::AskArgs),
    /// Run one research search and print the results
    Search(commands::search::SearchArgs),
    /// List dashboard modules
    Modules(commands::modules::ModulesArgs),
    /// Manage aegis configuration (path, show, init)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug, Default)]
struct RunArgs {
    /// Module to open first (overview, health, governance, climate, search)
    #[arg(long, value_name = "ID")]
    module: Option<String>,

    /// Start with the sidebar collapsed
    #[arg(long)]
    collapsed: bool,
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    let mut tracing_config = TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
        log_file: None,
    };

    match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => {
            let mut config = config::load_config(config_path)?;
            if let Some(module) = args.module {
                config.ui.start_module = Module::from_id_or_default(&module).id().to_string();
            }
            if args.collapsed {
                config.ui.sidebar_collapsed = true;
            }
            tracing_config.log_file = Some(config.ui.log_file());
            tracing_setup::init(&tracing_config).ok();
            tui::run(config).await?;
        }
        Commands::Ask(args) => {
            tracing_setup::init(&tracing_config).ok();
            let config = config::load_config(config_path)?;
            commands::run_ask(args, config).await?;
        }
        Commands::Search(args) => {
            tracing_setup::init(&tracing_config).ok();
            let config = config::load_config(config_path)?;
            commands::run_search(args, config).await?;
        }
        Commands::Modules(args) => commands::run_modules(args)?,
        Commands::Config(args) => {
            tracing_setup::init(&tracing_config).ok();
            config::run_config(args, config_path)?;
        }
        Commands::Completions(args) => run_completions(args)?,
    }

    tracing_setup::shutdown_otel();
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
