//! Definition file loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::spec::{DefinitionSpec, ModifierSpec};

/// Definition file structure for RON files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionFile {
    #[serde(default)]
    pub definitions: Vec<DefinitionSpec>,
    #[serde(default)]
    pub modifiers: Vec<ModifierSpec>,
}

/// Loader for tool definitions and modifiers from RON files.
pub struct DefinitionLoader;

impl DefinitionLoader {
    /// Load a definition file.
    pub fn load(path: &Path) -> LoadResult<DefinitionFile> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a definition file from RON text.
    pub fn parse(content: &str) -> LoadResult<DefinitionFile> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse definition RON: {}", e))
    }
}
