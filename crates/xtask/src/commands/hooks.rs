//! List hook tokens and the hooks each sample definition provides

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use console::style;
use forge_core::ForgeConfig;

use crate::utils;

/// List hook tokens and the hooks each sample definition provides
#[derive(Parser)]
pub struct Hooks {
    /// Only show this definition
    #[arg(value_name = "DEFINITION")]
    definition: Option<String>,

    /// RON definition file replacing the sample definitions and modifiers
    #[arg(short, long, value_name = "FILE")]
    definitions: Option<PathBuf>,
}

impl Hooks {
    pub fn execute(self) -> Result<()> {
        let service = utils::sample_service(ForgeConfig::default(), self.definitions.as_deref())?;
        let snapshot = service.snapshot();

        if self.definition.is_none() {
            println!("{}", style("Registered hooks:").bold().cyan());
            for id in service.registry().hooks().ids() {
                println!("  {}", id);
            }
            println!();
        }

        let definitions: Vec<_> = match &self.definition {
            Some(id) => vec![
                snapshot
                    .definition(id)
                    .ok_or_else(|| anyhow!("Unknown definition: {}", id))?,
            ],
            None => snapshot.definitions().collect(),
        };

        for definition in definitions {
            println!("{} {}", style("Definition:").bold().cyan(), definition.id());
            for (index, entry) in definition.modules().iter().enumerate() {
                let hooks: Vec<_> = entry.hooks().iter().map(|id| id.as_str()).collect();
                println!(
                    "  [{}] {} (priority {}) -> {}",
                    index,
                    style(entry.module().kind()).green(),
                    entry.priority(),
                    hooks.join(", ")
                );
            }
            let merged: Vec<_> = definition.hooks().ids().map(|id| id.as_str()).collect();
            println!("  {} {}", style("merged:").dim(), merged.join(", "));
            println!();
        }

        Ok(())
    }
}
