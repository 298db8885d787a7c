//! The pure `(definition, modifiers) -> stats` pipeline.
//!
//! ```text
//! definition.hooks[TOOL_STATS]      -> builder
//! for modifier in ordered_modifiers  (priority, then persisted order)
//!     modifier.hooks[MODIFIER_STATS] -> builder
//! builder.build(item)               -> ToolStats
//! ```

use std::sync::Arc;

use crate::context::ToolContext;
use crate::definition::ToolDefinition;
use crate::modifier::{Modifier, ModifierEntry, ModifierList, ModifierLookup};
use crate::stat::{MODIFIER_STATS, ModifierStatsBuilder, TOOL_STATS, ToolStats};

/// Resolves the modifiers of a list, sorted by `(priority, persisted order)`.
///
/// Ids the lookup does not know are skipped.
pub fn ordered_modifiers<'l>(
    modifiers: &'l ModifierList,
    lookup: &dyn ModifierLookup,
) -> Vec<(Arc<Modifier>, &'l ModifierEntry)> {
    let mut resolved: Vec<_> = modifiers
        .iter()
        .filter_map(|entry| {
            lookup
                .modifier(entry.id().as_str())
                .map(|modifier| (modifier, entry))
        })
        .collect();
    // Stable: equal priorities keep persisted order.
    resolved.sort_by_key(|(modifier, _)| modifier.priority());
    resolved
}

/// Runs every stat hook of the definition and its modifiers into a builder.
pub fn collect_stats(
    definition: &ToolDefinition,
    modifiers: &ModifierList,
    context: &ToolContext<'_>,
    lookup: &dyn ModifierLookup,
) -> ModifierStatsBuilder {
    let context = context.with_modifiers(modifiers);
    let mut builder = ModifierStatsBuilder::new();

    definition
        .hooks()
        .get(&TOOL_STATS)
        .add_tool_stats(&context, &mut builder);

    for (modifier, entry) in ordered_modifiers(modifiers, lookup) {
        modifier
            .hooks()
            .get(&MODIFIER_STATS)
            .add_modifier_stats(&context, entry, &mut builder);
    }

    builder
}

/// Final stats of a tool. Deterministic for a given definition and list.
pub fn resolve_stats(
    definition: &ToolDefinition,
    modifiers: &ModifierList,
    context: &ToolContext<'_>,
    lookup: &dyn ModifierLookup,
) -> ToolStats {
    collect_stats(definition, modifiers, context, lookup).build(Some(context.item()))
}
