use super::{ModifierStatsBuilder, StatValue, ToolStat};
use crate::id::StatId;
use crate::predicate::ItemPredicate;

/// Ordinal stat (harvest level, armor class). The highest reported tier wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierStat {
    id: StatId,
    default: u32,
    names: Vec<String>,
    scope: ItemPredicate,
}

impl TierStat {
    pub fn new(id: impl Into<StatId>, default: u32) -> Self {
        Self {
            id: id.into(),
            default,
            names: Vec::new(),
            scope: ItemPredicate::Any,
        }
    }

    /// Display names indexed by tier. Tiers past the end render as numbers.
    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: ItemPredicate) -> Self {
        self.scope = scope;
        self
    }

    pub fn id(&self) -> &StatId {
        &self.id
    }

    pub fn default_value(&self) -> u32 {
        self.default
    }

    /// Reports a tier; the builder keeps the highest one.
    pub fn update(&self, builder: &mut ModifierStatsBuilder, tier: u32) {
        builder.raise_tier(self, tier);
    }

    pub fn get(&self, builder: &ModifierStatsBuilder) -> u32 {
        builder.tier_value(self)
    }
}

impl ToolStat for TierStat {
    type Value = u32;

    fn id(&self) -> &StatId {
        &self.id
    }

    fn default_value(&self) -> u32 {
        self.default
    }

    fn scope(&self) -> &ItemPredicate {
        &self.scope
    }

    fn read(&self, value: StatValue) -> Option<u32> {
        match value {
            StatValue::Tier(tier) => Some(tier),
            StatValue::Float(_) => None,
        }
    }

    fn write(&self, value: u32) -> StatValue {
        StatValue::Tier(value)
    }

    fn format_value(&self, value: u32) -> String {
        usize::try_from(value)
            .ok()
            .and_then(|index| self.names.get(index))
            .cloned()
            .unwrap_or_else(|| value.to_string())
    }
}
