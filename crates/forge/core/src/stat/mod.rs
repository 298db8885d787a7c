//! Stat tokens and the builder that resolves contributions into final values.
//!
//! # Calculation order
//!
//! Every float stat resolves its contributions in a fixed order, whatever
//! order modules called in:
//!
//! ```text
//! value = clamp((update_or_default + Σ add) × Π multiply × Π multiply_all, min, max)
//! ```
//!
//! Tier stats keep the highest tier any contributor reported.
//!
//! `ModifierStatsBuilder::build` drops every stat that resolves to its
//! default, so persisted [`ToolStats`] only hold meaningful values.

mod builder;
mod float;
mod hooks;
mod snapshot;
mod tier;

pub use builder::{FloatAccumulator, ModifierStatsBuilder};
pub use float::{FloatStat, StatFormat};
pub use hooks::{MODIFIER_STATS, ModifierStatsHook, TOOL_STATS, ToolStatsHook};
pub use snapshot::ToolStats;
pub use tier::TierStat;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ErrorSeverity, ForgeError};
use crate::id::StatId;
use crate::predicate::{ItemPredicate, ItemProfile};

/// A resolved stat value as stored in [`ToolStats`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatValue {
    Float(f32),
    Tier(u32),
}

/// Identity and semantics of one stat.
///
/// Implemented by [`FloatStat`] and [`TierStat`]; the associated `Value` is the
/// typed form gameplay code reads back through [`ToolStats::get`].
pub trait ToolStat: fmt::Debug + Send + Sync {
    type Value: Copy + PartialEq + fmt::Debug;

    fn id(&self) -> &StatId;

    fn default_value(&self) -> Self::Value;

    /// Items this stat applies to. Contributions for items outside the scope
    /// are dropped by `ModifierStatsBuilder::build`.
    fn scope(&self) -> &ItemPredicate;

    fn supports(&self, item: &ItemProfile) -> bool {
        self.scope().matches(item)
    }

    /// Reads the typed value from a stored one, if the kinds match.
    fn read(&self, value: StatValue) -> Option<Self::Value>;

    fn write(&self, value: Self::Value) -> StatValue;

    /// Human-readable rendering of a value, for tooltips.
    fn format_value(&self, value: Self::Value) -> String;
}

/// Type-erased view of a stat used by the [`StatRegistry`].
pub trait StatDefinition: fmt::Debug + Send + Sync {
    fn stat_id(&self) -> &StatId;

    /// Formats a stored value, or `None` if it has the wrong kind.
    fn format_stat_value(&self, value: StatValue) -> Option<String>;
}

impl<S: ToolStat> StatDefinition for S {
    fn stat_id(&self) -> &StatId {
        self.id()
    }

    fn format_stat_value(&self, value: StatValue) -> Option<String> {
        self.read(value).map(|v| self.format_value(v))
    }
}

/// Registry of every stat known to the process.
#[derive(Debug, Default)]
pub struct StatRegistry {
    stats: BTreeMap<StatId, Arc<dyn StatDefinition>>,
}

impl StatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a stat.
    ///
    /// # Errors
    ///
    /// Returns [`StatError::Duplicate`] if the id is taken.
    pub fn register<S: ToolStat + 'static>(&mut self, stat: S) -> Result<(), StatError> {
        if self.stats.contains_key(stat.id().as_str()) {
            return Err(StatError::Duplicate {
                stat: stat.id().clone(),
            });
        }
        self.stats.insert(stat.id().clone(), Arc::new(stat));
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn StatDefinition>> {
        self.stats.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.stats.contains_key(id)
    }

    /// Formats `value` as `"<id>: <value>"` using the stat's own formatting.
    pub fn format(&self, id: &str, value: StatValue) -> Option<String> {
        let stat = self.get(id)?;
        let rendered = stat.format_stat_value(value)?;
        Some(format!("{}: {}", stat.stat_id(), rendered))
    }

    pub fn ids(&self) -> impl Iterator<Item = &StatId> + '_ {
        self.stats.keys()
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

/// Configuration errors raised by the stat registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StatError {
    #[error("stat {stat} is already registered")]
    Duplicate { stat: StatId },
}

impl ForgeError for StatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Duplicate { .. } => "STAT_DUPLICATE",
        }
    }
}
