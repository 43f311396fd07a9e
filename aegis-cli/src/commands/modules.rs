use aegis_core::MODULES;
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
pub struct ModulesArgs {
    /// Print the registry as JSON
    #[arg(long)]
    pub json: bool,
}

/// List the sidebar modules in display order
pub fn run_modules(args: ModulesArgs) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(&MODULES).context("Failed to serialize modules")?;
        println!("{}", json);
        return Ok(());
    }

    for (index, info) in MODULES.iter().enumerate() {
        println!(
            "{}. {} {:<12} {:<14} {}",
            index + 1,
            info.glyph,
            info.module.id(),
            info.label,
            info.module.surface().id()
        );
    }
    Ok(())
}
