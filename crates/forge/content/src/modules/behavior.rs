//! Modules implementing one stock behavior hook each.

use std::sync::Arc;

use forge_core::{HookId, HookProvider, ItemTag, Module, ToolContext};

use crate::hooks::{
    INTERACTION, InteractionHook, MODIFIER_SLOTS, ModifierSlotsHook, RARITY, Rarity, RarityHook,
    TOOL_ACTION, TOOLTIP, ToolAction, ToolActionHook, TooltipHook,
};

/// Adds fixed tooltip lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TooltipModule {
    lines: Vec<String>,
}

impl TooltipModule {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl TooltipHook for TooltipModule {
    fn tooltip(&self, _context: &ToolContext<'_>) -> Vec<String> {
        self.lines.clone()
    }
}

impl Module for TooltipModule {
    fn kind(&self) -> &'static str {
        "tooltip"
    }

    fn default_hooks(&self) -> Vec<HookId> {
        vec![TOOLTIP.id().clone()]
    }

    fn provide_hooks(self: Arc<Self>, hooks: &mut HookProvider) {
        hooks.provide(&TOOLTIP, self as Arc<dyn TooltipHook>);
    }
}

/// Enables a set of world actions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolActionModule {
    actions: Vec<ToolAction>,
}

impl ToolActionModule {
    pub fn new(actions: impl IntoIterator<Item = ToolAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }
}

impl ToolActionHook for ToolActionModule {
    fn can_perform(&self, _context: &ToolContext<'_>, action: ToolAction) -> bool {
        self.actions.contains(&action)
    }
}

impl Module for ToolActionModule {
    fn kind(&self) -> &'static str {
        "tool_action"
    }

    fn default_hooks(&self) -> Vec<HookId> {
        vec![TOOL_ACTION.id().clone()]
    }

    fn provide_hooks(self: Arc<Self>, hooks: &mut HookProvider) {
        hooks.provide(&TOOL_ACTION, self as Arc<dyn ToolActionHook>);
    }
}

/// Handles interactions with targets carrying a tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionModule {
    target: ItemTag,
    message: String,
}

impl InteractionModule {
    pub fn new(target: impl Into<ItemTag>, message: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            message: message.into(),
        }
    }
}

impl InteractionHook for InteractionModule {
    fn interact(&self, _context: &ToolContext<'_>, target: &str, log: &mut Vec<String>) -> bool {
        if self.target.as_str() != target {
            return false;
        }
        log.push(self.message.clone());
        true
    }
}

impl Module for InteractionModule {
    fn kind(&self) -> &'static str {
        "interaction"
    }

    fn default_hooks(&self) -> Vec<HookId> {
        vec![INTERACTION.id().clone()]
    }

    fn provide_hooks(self: Arc<Self>, hooks: &mut HookProvider) {
        hooks.provide(&INTERACTION, self as Arc<dyn InteractionHook>);
    }
}

/// Grants modifier slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotsModule {
    slots: u32,
}

impl SlotsModule {
    pub fn new(slots: u32) -> Self {
        Self { slots }
    }
}

impl ModifierSlotsHook for SlotsModule {
    fn modifier_slots(&self, _context: &ToolContext<'_>) -> u32 {
        self.slots
    }
}

impl Module for SlotsModule {
    fn kind(&self) -> &'static str {
        "slots"
    }

    fn default_hooks(&self) -> Vec<HookId> {
        vec![MODIFIER_SLOTS.id().clone()]
    }

    fn provide_hooks(self: Arc<Self>, hooks: &mut HookProvider) {
        hooks.provide(&MODIFIER_SLOTS, self as Arc<dyn ModifierSlotsHook>);
    }
}

/// Raises the display rarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RarityModule {
    rarity: Rarity,
}

impl RarityModule {
    pub fn new(rarity: Rarity) -> Self {
        Self { rarity }
    }
}

impl RarityHook for RarityModule {
    fn rarity(&self, _context: &ToolContext<'_>) -> Rarity {
        self.rarity
    }
}

impl Module for RarityModule {
    fn kind(&self) -> &'static str {
        "rarity"
    }

    fn default_hooks(&self) -> Vec<HookId> {
        vec![RARITY.id().clone()]
    }

    fn provide_hooks(self: Arc<Self>, hooks: &mut HookProvider) {
        hooks.provide(&RARITY, self as Arc<dyn RarityHook>);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::hook_registry;
    use forge_core::{HookMapBuilder, ModuleEntry, ModuleSet};

    fn set() -> ModuleSet {
        ModuleSet::new()
            .with_module(Arc::new(TooltipModule::new(["Sturdy"])))
            .with_module(Arc::new(ToolActionModule::new([ToolAction::Dig])))
            .with_module(Arc::new(InteractionModule::new("log", "stripped log")))
            .with_module(Arc::new(InteractionModule::new("log", "never reached")))
            .with_module(Arc::new(SlotsModule::new(3)))
            .with_module(Arc::new(SlotsModule::new(1)))
            .with_module(Arc::new(RarityModule::new(Rarity::Rare)))
            .with_module(Arc::new(RarityModule::new(Rarity::Uncommon)))
            .with(
                ModuleEntry::with_default_hooks(Arc::new(TooltipModule::new(["Forged"])))
                    .with_priority(-10),
            )
            .with_module(Arc::new(ToolActionModule::new([ToolAction::Till])))
    }

    #[test]
    fn every_strategy_merges() {
        let registry = hook_registry().unwrap();
        let map = HookMapBuilder::new(&registry).build(&set()).unwrap();
        let context = ToolContext::detached();

        assert_eq!(map.get(&TOOLTIP).tooltip(&context), vec!["Forged", "Sturdy"]);
        assert!(map.get(&TOOL_ACTION).can_perform(&context, ToolAction::Dig));
        assert!(map.get(&TOOL_ACTION).can_perform(&context, ToolAction::Till));
        assert!(!map.get(&TOOL_ACTION).can_perform(&context, ToolAction::Shear));
        assert_eq!(map.get(&MODIFIER_SLOTS).modifier_slots(&context), 4);
        assert_eq!(map.get(&RARITY).rarity(&context), Rarity::Rare);

        let mut log = Vec::new();
        assert!(map.get(&INTERACTION).interact(&context, "log", &mut log));
        assert_eq!(log, vec!["stripped log"]);
        assert!(!map.get(&INTERACTION).interact(&context, "stone", &mut log));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn slot_totals_saturate() {
        let registry = hook_registry().unwrap();
        let modules = ModuleSet::new()
            .with_module(Arc::new(SlotsModule::new(u32::MAX)))
            .with_module(Arc::new(SlotsModule::new(1)));
        let map = HookMapBuilder::new(&registry).build(&modules).unwrap();
        assert_eq!(
            map.get(&MODIFIER_SLOTS).modifier_slots(&ToolContext::detached()),
            u32::MAX
        );
    }
}
