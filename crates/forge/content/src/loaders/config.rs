//! Engine configuration loader.

use std::path::Path;

use forge_core::ForgeConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`ForgeConfig`] from TOML files.
///
/// Missing keys take their defaults:
///
/// ```toml
/// strict_definitions = true
/// double_update = "warn"
/// cache_stats = false
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> LoadResult<ForgeConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> LoadResult<ForgeConfig> {
        let config: ForgeConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::DoubleUpdatePolicy;

    #[test]
    fn parses_partial_config() {
        let config = ConfigLoader::parse("double_update = \"warn\"\n").unwrap();
        assert_eq!(config.double_update, DoubleUpdatePolicy::Warn);
        assert_eq!(config, ForgeConfig::new().with_double_update(DoubleUpdatePolicy::Warn));
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), ForgeConfig::default());
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = ConfigLoader::parse("double_update = \"explode\"").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config TOML"));
    }

    #[test]
    fn missing_file_names_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/forge.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/forge.toml"));
    }
}
