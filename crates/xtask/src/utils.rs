//! Utility functions for xtask commands

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use forge_content::{Catalog, ConfigLoader, DefinitionLoader, hook_registry};
use forge_core::ForgeConfig;
use forge_runtime::{DefinitionRegistry, RuntimeConfig, StatsService};

/// Reads the engine config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<ForgeConfig> {
    match path {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(ForgeConfig::default()),
    }
}

/// A stats service over the sample materials.
///
/// Definitions and modifiers come from the sample catalog unless a RON
/// definition file is given.
pub fn sample_service(config: ForgeConfig, definitions: Option<&Path>) -> Result<StatsService> {
    let mut catalog = Catalog::sample();
    if let Some(path) = definitions {
        let file = DefinitionLoader::load(path)
            .with_context(|| format!("Failed to load definitions: {}", path.display()))?;
        catalog.definitions = file.definitions;
        catalog.modifiers = file.modifiers;
    }

    let hooks = hook_registry().map_err(|e| anyhow!("Failed to register hooks: {}", e))?;
    let registry = DefinitionRegistry::new(hooks, RuntimeConfig::new(config));
    let service = StatsService::new(registry, Arc::new(catalog.materials.clone()));
    service
        .reload(&catalog)
        .context("Failed to build definitions")?;
    Ok(service)
}
