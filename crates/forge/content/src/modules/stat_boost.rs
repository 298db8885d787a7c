use std::sync::Arc;

use forge_core::modifier::priority;
use forge_core::{
    FloatStat, HookId, HookProvider, ItemPredicate, MODIFIER_STATS, Module, ModifierEntry,
    ModifierStatsBuilder, ModifierStatsHook, StatOperation, TOOL_STATS, ToolContext,
    ToolStatsHook,
};

/// Boosts one float stat per modifier level.
///
/// | operation | effect at level `n` |
/// |---|---|
/// | `update` | `update(value)` |
/// | `add` | `add(value × n)` |
/// | `multiply` | `multiply(1 + value × n)` |
/// | `multiply_all` | `multiply_all(1 + value × n)` |
///
/// The priority group follows the operation unless overridden.
#[derive(Clone, Debug, PartialEq)]
pub struct StatBoostModule {
    stat: FloatStat,
    operation: StatOperation,
    value: f32,
    condition: ItemPredicate,
    priority: i32,
}

impl StatBoostModule {
    pub fn new(stat: FloatStat, operation: StatOperation, value: f32) -> Self {
        let priority = match operation {
            StatOperation::Update | StatOperation::Add => priority::FLAT,
            StatOperation::Multiply => priority::MULTIPLIER,
            StatOperation::MultiplyAll => priority::GLOBAL,
        };
        Self {
            stat,
            operation,
            value,
            condition: ItemPredicate::Any,
            priority,
        }
    }

    /// Only applies to items matching `condition`.
    #[must_use]
    pub fn when(mut self, condition: ItemPredicate) -> Self {
        self.condition = condition;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    fn apply(&self, context: &ToolContext<'_>, level: u32, stats: &mut ModifierStatsBuilder) {
        if !self.condition.matches(context.item()) {
            return;
        }
        let scaled = self.value * level as f32;
        match self.operation {
            StatOperation::Update => self.stat.update(stats, self.value),
            StatOperation::Add => self.stat.add(stats, scaled),
            StatOperation::Multiply => self.stat.multiply(stats, 1.0 + scaled),
            StatOperation::MultiplyAll => self.stat.multiply_all(stats, 1.0 + scaled),
        }
    }
}

impl ModifierStatsHook for StatBoostModule {
    fn add_modifier_stats(
        &self,
        context: &ToolContext<'_>,
        modifier: &ModifierEntry,
        stats: &mut ModifierStatsBuilder,
    ) {
        self.apply(context, modifier.level(), stats);
    }
}

/// On a tool definition the boost applies once, as level 1.
impl ToolStatsHook for StatBoostModule {
    fn add_tool_stats(&self, context: &ToolContext<'_>, stats: &mut ModifierStatsBuilder) {
        self.apply(context, 1, stats);
    }
}

impl Module for StatBoostModule {
    fn kind(&self) -> &'static str {
        "stat_boost"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn default_hooks(&self) -> Vec<HookId> {
        vec![MODIFIER_STATS.id().clone()]
    }

    fn provide_hooks(self: Arc<Self>, hooks: &mut HookProvider) {
        hooks
            .provide(&MODIFIER_STATS, self.clone() as Arc<dyn ModifierStatsHook>)
            .provide(&TOOL_STATS, self as Arc<dyn ToolStatsHook>);
    }
}
