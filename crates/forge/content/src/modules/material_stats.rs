use std::sync::Arc;

use forge_core::{
    HookId, HookProvider, MaterialError, MaterialStatProvider, Module, ModifierStatsBuilder,
    TOOL_STATS, ToolContext, ToolStatsHook, WeightedStatType,
};

/// Derives stats from the materials of a tool's parts.
///
/// The part list is checked against the provider when the module is built,
/// so a definition with a bad part list never loads. At resolution time the
/// module reads materials and the material table from the [`ToolContext`];
/// without a table, or with a material list of the wrong length, it
/// contributes nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialStatsModule {
    provider: Arc<MaterialStatProvider>,
    parts: Vec<WeightedStatType>,
}

impl MaterialStatsModule {
    /// # Errors
    ///
    /// Returns the provider's validation error for `parts`.
    pub fn new(
        provider: Arc<MaterialStatProvider>,
        parts: Vec<WeightedStatType>,
    ) -> Result<Self, MaterialError> {
        provider.validate(&parts)?;
        Ok(Self { provider, parts })
    }

    pub fn parts(&self) -> &[WeightedStatType] {
        &self.parts
    }
}

impl ToolStatsHook for MaterialStatsModule {
    fn add_tool_stats(&self, context: &ToolContext<'_>, stats: &mut ModifierStatsBuilder) {
        if let Some(table) = context.material_stats() {
            self.provider
                .apply(&self.parts, context.materials(), table, stats);
        }
    }
}

impl Module for MaterialStatsModule {
    fn kind(&self) -> &'static str {
        "material_stats"
    }

    fn default_hooks(&self) -> Vec<HookId> {
        vec![TOOL_STATS.id().clone()]
    }

    fn provide_hooks(self: Arc<Self>, hooks: &mut HookProvider) {
        hooks.provide(&TOOL_STATS, self as Arc<dyn ToolStatsHook>);
    }
}
