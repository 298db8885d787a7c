use std::collections::BTreeMap;

use super::{StatRegistry, StatValue, ToolStat};
use crate::id::StatId;

/// Resolved stats of one tool: only values differing from their defaults.
///
/// This is the form persisted alongside an item. Ordering is by stat id, so
/// serialized output is stable.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ToolStats {
    values: BTreeMap<StatId, StatValue>,
}

impl ToolStats {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Typed value of `stat`, or its default when absent or of another kind.
    pub fn get<S: ToolStat>(&self, stat: &S) -> S::Value {
        self.values
            .get(stat.id().as_str())
            .and_then(|value| stat.read(*value))
            .unwrap_or_else(|| stat.default_value())
    }

    pub fn raw(&self, id: &str) -> Option<StatValue> {
        self.values.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StatId, &StatValue)> + '_ {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn insert(&mut self, id: StatId, value: StatValue) {
        self.values.insert(id, value);
    }

    /// One formatted line per stat known to `registry`, in id order.
    pub fn tooltip(&self, registry: &StatRegistry) -> Vec<String> {
        self.values
            .iter()
            .filter_map(|(id, value)| registry.format(id.as_str(), *value))
            .collect()
    }
}

impl FromIterator<(StatId, StatValue)> for ToolStats {
    fn from_iter<I: IntoIterator<Item = (StatId, StatValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
