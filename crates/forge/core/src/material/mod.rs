//! Weighted material aggregation.
//!
//! A tool built from parts stores one material per part. Each part has a
//! material stat type (`head`, `handle`, ...) and a [`Weight`]. A
//! [`MaterialStatProvider`] turns the per-part material stats into stat
//! contributions:
//!
//! ```text
//! parts      [(head, w=2), (handle, w=1)]
//! materials  [iron,        oak          ]
//!              |             |
//!   weigh     [(iron.head, 2), (oak.handle, 1)]   weight = repeat count
//!              |
//!   formula   sum / average / max per output stat
//!              |
//!   builder   update / add / multiply / multiply_all
//! ```

mod cache;
mod provider;

pub use cache::MaterialStatsCache;
pub use provider::{
    Aggregation, MaterialError, MaterialStatProvider, StatFormula, StatOperation, StatTarget,
};

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use crate::id::{MaterialId, MaterialStatsId};

/// How many times a part's values are repeated in the aggregated list.
///
/// A weight never scales a value; it only replicates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Weight(NonZeroU32);

impl Weight {
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Weight of `count`, or `None` for 0.
    pub fn new(count: u32) -> Option<Self> {
        NonZeroU32::new(count).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::ONE
    }
}

/// A part slot: which material stat type it reads and how heavily.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedStatType {
    stat_type: MaterialStatsId,
    #[cfg_attr(feature = "serde", serde(default))]
    weight: Weight,
}

impl WeightedStatType {
    pub fn new(stat_type: impl Into<MaterialStatsId>) -> Self {
        Self::weighted(stat_type, Weight::ONE)
    }

    pub fn weighted(stat_type: impl Into<MaterialStatsId>, weight: Weight) -> Self {
        Self {
            stat_type: stat_type.into(),
            weight,
        }
    }

    pub fn stat_type(&self) -> &MaterialStatsId {
        &self.stat_type
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }
}

/// Named attributes of one material for one stat type.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MaterialStats {
    values: BTreeMap<String, f32>,
}

impl MaterialStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute (builder pattern).
    #[must_use]
    pub fn with(mut self, attribute: impl Into<String>, value: f32) -> Self {
        self.values.insert(attribute.into(), value);
        self
    }

    pub fn insert(&mut self, attribute: impl Into<String>, value: f32) {
        self.values.insert(attribute.into(), value);
    }

    pub fn get(&self, attribute: &str) -> Option<f32> {
        self.values.get(attribute).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Material data owned by the material registry.
pub trait MaterialStatsSource: Send + Sync {
    /// Stats of `material` for `stat_type`, if the material defines them.
    fn stats(&self, material: &MaterialId, stat_type: &MaterialStatsId) -> Option<MaterialStats>;

    /// Stats used for materials lacking `stat_type`.
    fn default_stats(&self, stat_type: &MaterialStatsId) -> MaterialStats;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_zero_is_rejected() {
        assert!(Weight::new(0).is_none());
        assert_eq!(Weight::new(3).map(Weight::get), Some(3));
        assert_eq!(Weight::default(), Weight::ONE);
    }

    #[test]
    fn stat_type_defaults_to_weight_one() {
        let slot = WeightedStatType::new("handle");
        assert_eq!(slot.weight().get(), 1);
        assert_eq!(slot.stat_type().as_str(), "handle");
    }
}
