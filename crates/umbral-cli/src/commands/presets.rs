//! Preset management commands.

use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use umbral_config::{FACTORY_PRESET_NAMES, Preset, all_factory_presets, factory_preset};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List factory presets
    List,

    /// Show details of a preset (factory name or TOML file path)
    Show {
        /// Preset name or path
        name: String,
    },

    /// Export a factory preset to a TOML file for customization
    Export {
        /// Factory preset name
        name: String,

        /// Destination file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Overwrite if the file already exists
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List => list_presets(),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Export {
            name,
            output,
            force,
        } => export_preset(&name, &output, force),
    }
}

fn list_presets() -> anyhow::Result<()> {
    println!("Factory Presets:");
    println!("================");
    for (name, preset) in FACTORY_PRESET_NAMES.iter().zip(all_factory_presets()) {
        let desc = preset.description.as_deref().unwrap_or("");
        println!("  {:14} {:14} - {}", name, preset.name, desc);
    }
    println!();
    println!("Use with: umbral process in.wav out.wav --preset <name>");
    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = find_preset(name)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {}", desc);
        println!();
    }

    println!("Parameters ({}):", preset.len());
    for (key, value) in &preset.params {
        println!("  {:16} = {}", key, value);
    }

    Ok(())
}

fn export_preset(name: &str, output: &Path, force: bool) -> anyhow::Result<()> {
    let preset = factory_preset(name)?;

    if output.exists() && !force {
        anyhow::bail!(
            "File '{}' already exists. Use --force to overwrite.",
            output.display()
        );
    }

    preset.save(output)?;
    println!("Exported '{}' to {}", preset.name, output.display());
    Ok(())
}

/// Resolve a preset argument: existing file path first, factory name second.
fn find_preset(name: &str) -> anyhow::Result<Preset> {
    let path = PathBuf::from(name);
    if path.exists() {
        return Ok(Preset::load(&path)?);
    }
    Ok(factory_preset(name)?)
}
