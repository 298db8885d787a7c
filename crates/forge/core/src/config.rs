/// What to do when a float stat receives more than one `update` in a pass.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DoubleUpdatePolicy {
    /// Later updates add onto the first one.
    #[default]
    Accumulate,
    /// Same as `Accumulate`, and the runtime logs a warning naming the stat.
    Warn,
}

/// Engine configuration shared by content loaders and the runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ForgeConfig {
    /// Reject a reload when any definition fails to build, instead of
    /// substituting an empty definition for it.
    pub strict_definitions: bool,
    pub double_update: DoubleUpdatePolicy,
    /// Memoize resolved stats per item state until the next reload.
    pub cache_stats: bool,
}

impl ForgeConfig {
    pub const DEFAULT_STRICT_DEFINITIONS: bool = false;
    pub const DEFAULT_CACHE_STATS: bool = true;

    pub fn new() -> Self {
        Self {
            strict_definitions: Self::DEFAULT_STRICT_DEFINITIONS,
            double_update: DoubleUpdatePolicy::Accumulate,
            cache_stats: Self::DEFAULT_CACHE_STATS,
        }
    }

    #[must_use]
    pub fn with_strict_definitions(mut self, strict: bool) -> Self {
        self.strict_definitions = strict;
        self
    }

    #[must_use]
    pub fn with_double_update(mut self, policy: DoubleUpdatePolicy) -> Self {
        self.double_update = policy;
        self
    }

    #[must_use]
    pub fn with_cache_stats(mut self, enabled: bool) -> Self {
        self.cache_stats = enabled;
        self
    }
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self::new()
    }
}
