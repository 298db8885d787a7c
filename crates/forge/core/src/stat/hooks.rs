//! The two hooks every stat pass runs through.

use std::sync::{Arc, LazyLock};

use super::ModifierStatsBuilder;
use crate::context::ToolContext;
use crate::hook::{AllMerger, ModuleHook};
use crate::modifier::ModifierEntry;

/// Contributes a tool definition's own stats (base values, materials).
pub trait ToolStatsHook: Send + Sync {
    fn add_tool_stats(&self, context: &ToolContext<'_>, stats: &mut ModifierStatsBuilder);
}

/// Contributes a modifier's stats, scaled by the modifier entry's level.
pub trait ModifierStatsHook: Send + Sync {
    fn add_modifier_stats(
        &self,
        context: &ToolContext<'_>,
        modifier: &ModifierEntry,
        stats: &mut ModifierStatsBuilder,
    );
}

struct NoToolStats;

impl ToolStatsHook for NoToolStats {
    fn add_tool_stats(&self, _context: &ToolContext<'_>, _stats: &mut ModifierStatsBuilder) {}
}

struct NoModifierStats;

impl ModifierStatsHook for NoModifierStats {
    fn add_modifier_stats(
        &self,
        _context: &ToolContext<'_>,
        _modifier: &ModifierEntry,
        _stats: &mut ModifierStatsBuilder,
    ) {
    }
}

impl ToolStatsHook for AllMerger<dyn ToolStatsHook> {
    fn add_tool_stats(&self, context: &ToolContext<'_>, stats: &mut ModifierStatsBuilder) {
        self.for_each(|hook| hook.add_tool_stats(context, stats));
    }
}

impl ModifierStatsHook for AllMerger<dyn ModifierStatsHook> {
    fn add_modifier_stats(
        &self,
        context: &ToolContext<'_>,
        modifier: &ModifierEntry,
        stats: &mut ModifierStatsBuilder,
    ) {
        self.for_each(|hook| hook.add_modifier_stats(context, modifier, stats));
    }
}

fn merge_tool_stats(hooks: Vec<Arc<dyn ToolStatsHook>>) -> Arc<dyn ToolStatsHook> {
    Arc::new(AllMerger::new(hooks))
}

fn merge_modifier_stats(hooks: Vec<Arc<dyn ModifierStatsHook>>) -> Arc<dyn ModifierStatsHook> {
    Arc::new(AllMerger::new(hooks))
}

/// Runs every requesting module, in priority order.
pub static TOOL_STATS: LazyLock<ModuleHook<dyn ToolStatsHook>> = LazyLock::new(|| {
    ModuleHook::<dyn ToolStatsHook>::with_merger(
        "forge:tool_stats",
        Arc::new(NoToolStats),
        merge_tool_stats,
    )
});

/// Runs every requesting module of a modifier, in priority order.
pub static MODIFIER_STATS: LazyLock<ModuleHook<dyn ModifierStatsHook>> = LazyLock::new(|| {
    ModuleHook::<dyn ModifierStatsHook>::with_merger(
        "forge:modifier_stats",
        Arc::new(NoModifierStats),
        merge_modifier_stats,
    )
});
