//! Stock behavior hooks, one per merge strategy.
//!
//! | token | merge |
//! |---|---|
//! | [`TOOLTIP`] | concatenate lines in priority order |
//! | [`TOOL_ACTION`] | boolean union |
//! | [`INTERACTION`] | first module that handles the interaction wins |
//! | [`MODIFIER_SLOTS`] | sum |
//! | [`RARITY`] | max |

use std::sync::{Arc, LazyLock};

use forge_core::{AllMerger, HookError, HookRegistry, ModuleHook, ToolContext};

// ============================================================================
// Value types
// ============================================================================

/// Actions a tool can perform on the world.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ToolAction {
    Dig,
    Till,
    Strip,
    Shear,
    Block,
}

/// Display rarity; merged by taking the highest.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
}

// ============================================================================
// Hook traits
// ============================================================================

pub trait TooltipHook: Send + Sync {
    fn tooltip(&self, context: &ToolContext<'_>) -> Vec<String>;
}

pub trait ToolActionHook: Send + Sync {
    fn can_perform(&self, context: &ToolContext<'_>, action: ToolAction) -> bool;
}

/// Interaction with a target in the world. Returns true once handled.
pub trait InteractionHook: Send + Sync {
    fn interact(&self, context: &ToolContext<'_>, target: &str, log: &mut Vec<String>) -> bool;
}

pub trait ModifierSlotsHook: Send + Sync {
    fn modifier_slots(&self, context: &ToolContext<'_>) -> u32;
}

pub trait RarityHook: Send + Sync {
    fn rarity(&self, context: &ToolContext<'_>) -> Rarity;
}

// ============================================================================
// Defaults
// ============================================================================

struct Inert;

impl TooltipHook for Inert {
    fn tooltip(&self, _context: &ToolContext<'_>) -> Vec<String> {
        Vec::new()
    }
}

impl ToolActionHook for Inert {
    fn can_perform(&self, _context: &ToolContext<'_>, _action: ToolAction) -> bool {
        false
    }
}

impl InteractionHook for Inert {
    fn interact(&self, _context: &ToolContext<'_>, _target: &str, _log: &mut Vec<String>) -> bool {
        false
    }
}

impl ModifierSlotsHook for Inert {
    fn modifier_slots(&self, _context: &ToolContext<'_>) -> u32 {
        0
    }
}

impl RarityHook for Inert {
    fn rarity(&self, _context: &ToolContext<'_>) -> Rarity {
        Rarity::Common
    }
}

// ============================================================================
// Mergers
// ============================================================================

impl TooltipHook for AllMerger<dyn TooltipHook> {
    fn tooltip(&self, context: &ToolContext<'_>) -> Vec<String> {
        self.concat(|hook| hook.tooltip(context))
    }
}

impl ToolActionHook for AllMerger<dyn ToolActionHook> {
    fn can_perform(&self, context: &ToolContext<'_>, action: ToolAction) -> bool {
        self.any(|hook| hook.can_perform(context, action))
    }
}

impl InteractionHook for AllMerger<dyn InteractionHook> {
    fn interact(&self, context: &ToolContext<'_>, target: &str, log: &mut Vec<String>) -> bool {
        self.until_handled(|hook| hook.interact(context, target, log))
    }
}

impl ModifierSlotsHook for AllMerger<dyn ModifierSlotsHook> {
    fn modifier_slots(&self, context: &ToolContext<'_>) -> u32 {
        self.sum_by(0, |hook| hook.modifier_slots(context))
    }
}

impl RarityHook for AllMerger<dyn RarityHook> {
    fn rarity(&self, context: &ToolContext<'_>) -> Rarity {
        self.max_by(Rarity::Common, |hook| hook.rarity(context))
    }
}

fn merge_tooltip(hooks: Vec<Arc<dyn TooltipHook>>) -> Arc<dyn TooltipHook> {
    Arc::new(AllMerger::new(hooks))
}

fn merge_tool_action(hooks: Vec<Arc<dyn ToolActionHook>>) -> Arc<dyn ToolActionHook> {
    Arc::new(AllMerger::new(hooks))
}

fn merge_interaction(hooks: Vec<Arc<dyn InteractionHook>>) -> Arc<dyn InteractionHook> {
    Arc::new(AllMerger::new(hooks))
}

fn merge_modifier_slots(hooks: Vec<Arc<dyn ModifierSlotsHook>>) -> Arc<dyn ModifierSlotsHook> {
    Arc::new(AllMerger::new(hooks))
}

fn merge_rarity(hooks: Vec<Arc<dyn RarityHook>>) -> Arc<dyn RarityHook> {
    Arc::new(AllMerger::new(hooks))
}

// ============================================================================
// Tokens
// ============================================================================

pub static TOOLTIP: LazyLock<ModuleHook<dyn TooltipHook>> = LazyLock::new(|| {
    ModuleHook::<dyn TooltipHook>::with_merger("forge:tooltip", Arc::new(Inert), merge_tooltip)
});

pub static TOOL_ACTION: LazyLock<ModuleHook<dyn ToolActionHook>> = LazyLock::new(|| {
    ModuleHook::<dyn ToolActionHook>::with_merger(
        "forge:tool_action",
        Arc::new(Inert),
        merge_tool_action,
    )
});

pub static INTERACTION: LazyLock<ModuleHook<dyn InteractionHook>> = LazyLock::new(|| {
    ModuleHook::<dyn InteractionHook>::with_merger(
        "forge:interaction",
        Arc::new(Inert),
        merge_interaction,
    )
});

pub static MODIFIER_SLOTS: LazyLock<ModuleHook<dyn ModifierSlotsHook>> = LazyLock::new(|| {
    ModuleHook::<dyn ModifierSlotsHook>::with_merger(
        "forge:modifier_slots",
        Arc::new(Inert),
        merge_modifier_slots,
    )
});

pub static RARITY: LazyLock<ModuleHook<dyn RarityHook>> = LazyLock::new(|| {
    ModuleHook::<dyn RarityHook>::with_merger("forge:rarity", Arc::new(Inert), merge_rarity)
});

/// Core stat hooks plus every stock behavior hook.
///
/// # Errors
///
/// Only fails if a stock id collides with a core one.
pub fn hook_registry() -> Result<HookRegistry, HookError> {
    let mut registry = HookRegistry::with_core_hooks();
    registry.register(TOOLTIP.clone())?;
    registry.register(TOOL_ACTION.clone())?;
    registry.register(INTERACTION.clone())?;
    registry.register(MODIFIER_SLOTS.clone())?;
    registry.register(RARITY.clone())?;
    Ok(registry)
}
