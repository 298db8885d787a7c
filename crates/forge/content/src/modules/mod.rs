//! Stock modules.
//!
//! Stat modules:
//! - [`SetStatsModule`]: base values through `update`
//! - [`StatBoostModule`]: per-level add / multiply / multiply-all, optionally
//!   limited to matching items
//! - [`MaterialStatsModule`]: weighted material aggregation
//!
//! Behavior modules ([`behavior`]) each implement one stock hook.

pub mod behavior;
mod material_stats;
mod set_stats;
mod stat_boost;

pub use behavior::{InteractionModule, RarityModule, SlotsModule, ToolActionModule, TooltipModule};
pub use material_stats::MaterialStatsModule;
pub use set_stats::SetStatsModule;
pub use stat_boost::StatBoostModule;
