//! Resolve the stats of a sample tool
//!
//! Builds the sample catalog through the runtime and prints what one item
//! resolves to.

use std::num::NonZeroU32;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use console::style;
use forge_content::stat_registry;
use forge_runtime::ItemState;

use crate::utils;

/// Resolve the stats of a sample tool
#[derive(Parser)]
pub struct Resolve {
    /// Definition id (e.g., pickaxe, sword, hatchet)
    #[arg(value_name = "DEFINITION")]
    definition: String,

    /// Material for each part, in part order (e.g., -m iron -m wood)
    #[arg(short, long = "material", value_name = "MATERIAL")]
    materials: Vec<String>,

    /// Modifier with optional level (e.g., haste or haste:2)
    #[arg(short = 'M', long = "modifier", value_name = "ID[:LEVEL]")]
    modifiers: Vec<String>,

    /// Engine config TOML (defaults to built-in settings)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// RON definition file replacing the sample definitions and modifiers
    #[arg(short, long, value_name = "FILE")]
    definitions: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Tooltip lines
    Summary,
    /// Resolved stats as JSON
    Json,
}

impl Resolve {
    pub fn execute(self) -> Result<()> {
        let config = utils::load_config(self.config.as_deref())?;
        let service = utils::sample_service(config, self.definitions.as_deref())?;

        let mut item = ItemState::new(self.definition.clone()).with_materials(self.materials);
        for modifier in &self.modifiers {
            let (id, levels) = parse_modifier(modifier)?;
            item = item.with_modifier(id, levels);
        }

        let stats = service
            .stats(&item)
            .with_context(|| format!("Failed to resolve {}", self.definition))?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&*stats)?);
            }
            OutputFormat::Summary => {
                let registry =
                    stat_registry().map_err(|e| anyhow!("Failed to register stats: {}", e))?;
                println!(
                    "{} {}",
                    style("Definition:").bold().cyan(),
                    item.definition
                );
                if !item.materials.is_empty() {
                    let materials: Vec<_> = item.materials.iter().map(|m| m.as_str()).collect();
                    println!(
                        "{} {}",
                        style("Materials:").bold().cyan(),
                        materials.join(", ")
                    );
                }
                for entry in item.modifiers.iter() {
                    println!(
                        "{} {} {}",
                        style("Modifier:").bold().cyan(),
                        entry.id(),
                        entry.level()
                    );
                }
                println!();
                for line in service.tooltip(&item, &registry)? {
                    println!("  {}", line);
                }
            }
        }

        Ok(())
    }
}

/// Splits `id[:level]`; the level defaults to 1.
fn parse_modifier(raw: &str) -> Result<(String, NonZeroU32)> {
    let (id, level) = match raw.split_once(':') {
        Some((id, level)) => {
            let level: u32 = level
                .parse()
                .with_context(|| format!("Invalid modifier level: {}", raw))?;
            (id, level)
        }
        None => (raw, 1),
    };
    let level = NonZeroU32::new(level)
        .ok_or_else(|| anyhow!("Modifier level must be at least 1: {}", raw))?;
    Ok((id.to_string(), level))
}
