use std::sync::Arc;

use forge_core::{
    FloatStat, HookId, HookProvider, MODIFIER_STATS, Module, ModifierEntry, ModifierStatsBuilder,
    ModifierStatsHook, TOOL_STATS, TierStat, ToolContext, ToolStatsHook,
};

/// Sets base stat values.
///
/// Requested for `forge:tool_stats` by default. A modifier can request
/// `forge:modifier_stats` instead; the level is ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetStatsModule {
    floats: Vec<(FloatStat, f32)>,
    tiers: Vec<(TierStat, u32)>,
}

impl SetStatsModule {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_float(mut self, stat: FloatStat, value: f32) -> Self {
        self.floats.push((stat, value));
        self
    }

    #[must_use]
    pub fn with_tier(mut self, stat: TierStat, tier: u32) -> Self {
        self.tiers.push((stat, tier));
        self
    }

    fn apply(&self, stats: &mut ModifierStatsBuilder) {
        for (stat, value) in &self.floats {
            stat.update(stats, *value);
        }
        for (stat, tier) in &self.tiers {
            stat.update(stats, *tier);
        }
    }
}

impl ToolStatsHook for SetStatsModule {
    fn add_tool_stats(&self, _context: &ToolContext<'_>, stats: &mut ModifierStatsBuilder) {
        self.apply(stats);
    }
}

impl ModifierStatsHook for SetStatsModule {
    fn add_modifier_stats(
        &self,
        _context: &ToolContext<'_>,
        _modifier: &ModifierEntry,
        stats: &mut ModifierStatsBuilder,
    ) {
        self.apply(stats);
    }
}

impl Module for SetStatsModule {
    fn kind(&self) -> &'static str {
        "set_stats"
    }

    fn default_hooks(&self) -> Vec<HookId> {
        vec![TOOL_STATS.id().clone()]
    }

    fn provide_hooks(self: Arc<Self>, hooks: &mut HookProvider) {
        hooks
            .provide(&TOOL_STATS, self.clone() as Arc<dyn ToolStatsHook>)
            .provide(&MODIFIER_STATS, self as Arc<dyn ModifierStatsHook>);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{ATTACK_DAMAGE, HARVEST_TIER};

    #[test]
    fn sets_floats_and_tiers() {
        let module = SetStatsModule::new()
            .with_float(ATTACK_DAMAGE.clone(), 6.0)
            .with_tier(HARVEST_TIER.clone(), 2);
        let mut builder = ModifierStatsBuilder::new();
        module.add_tool_stats(&ToolContext::detached(), &mut builder);
        assert_eq!(ATTACK_DAMAGE.get(&builder), 6.0);
        assert_eq!(HARVEST_TIER.get(&builder), 2);
    }
}
