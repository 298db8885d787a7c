//! Hook composition and stat aggregation for composite items.
//!
//! `forge-core` lets independently authored modules jointly define the behavior
//! and numeric attributes of a tool, armor piece or modifier without any central
//! type knowing every module in advance. Two mechanisms carry the crate:
//!
//! - [`hook`] merges every module's implementation of a capability into one
//!   dispatchable object per definition ([`HookMap`])
//! - [`stat`] accumulates stat contributions (update/add/multiply/multiply-all)
//!   and resolves them into a minimal [`ToolStats`] snapshot
//!
//! [`material`] is the weighted material aggregator built on top of the stats
//! builder, and [`resolve`] wires definitions, modifiers and materials into the
//! pure `(definition, modifiers) -> stats` function persistence layers rely on.
pub mod cache;
pub mod config;
pub mod context;
pub mod definition;
pub mod error;
pub mod hook;
pub mod id;
pub mod material;
pub mod modifier;
pub mod module;
pub mod predicate;
pub mod resolve;
pub mod stat;

pub use cache::ReloadCache;
pub use config::{DoubleUpdatePolicy, ForgeConfig};
pub use context::ToolContext;
pub use definition::{DefinitionError, ToolDefinition};
pub use error::{ErrorSeverity, ForgeError};
pub use hook::{
    AllMerger, HookError, HookMap, HookMapBuilder, HookRegistry, MergeSum, ModuleHook,
};
pub use id::{DefinitionId, HookId, ItemTag, MaterialId, MaterialStatsId, ModifierId, StatId};
pub use material::{
    Aggregation, MaterialError, MaterialStatProvider, MaterialStats, MaterialStatsCache,
    MaterialStatsSource, StatFormula, StatOperation, StatTarget, Weight, WeightedStatType,
};
pub use modifier::{Modifier, ModifierEntry, ModifierList, ModifierLookup, ModifierRegistry};
pub use module::{HookProvider, Module, ModuleEntry, ModuleSet};
pub use predicate::{ItemPredicate, ItemProfile};
pub use resolve::{collect_stats, ordered_modifiers, resolve_stats};
pub use stat::{
    FloatStat, MODIFIER_STATS, ModifierStatsBuilder, ModifierStatsHook, StatError, StatFormat,
    StatRegistry, StatValue, TOOL_STATS, TierStat, ToolStat, ToolStats, ToolStatsHook,
};
