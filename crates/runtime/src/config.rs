//! Runtime configuration.

use forge_core::ForgeConfig;

/// Configuration shared by the definition registry and the stats service.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub forge: ForgeConfig,
    /// Log every definition id built on reload at `debug` (default: false)
    pub trace_definitions: bool,
}

impl RuntimeConfig {
    pub fn new(forge: ForgeConfig) -> Self {
        Self {
            forge,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_trace_definitions(mut self, enabled: bool) -> Self {
        self.trace_definitions = enabled;
        self
    }
}

impl From<ForgeConfig> for RuntimeConfig {
    fn from(forge: ForgeConfig) -> Self {
        Self::new(forge)
    }
}
