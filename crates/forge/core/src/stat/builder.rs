use std::collections::BTreeMap;

use super::{FloatStat, TierStat, ToolStat, ToolStats};
use crate::id::StatId;
use crate::predicate::ItemProfile;

/// Working state of one float stat within a builder pass.
///
/// Sums and products are kept in `f64` so that reordering contributions
/// inside a pass does not drift the final `f32`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatAccumulator {
    base: Option<f64>,
    added: f64,
    multiplier: f64,
    global: f64,
    updates: u32,
}

impl Default for FloatAccumulator {
    fn default() -> Self {
        Self {
            base: None,
            added: 0.0,
            multiplier: 1.0,
            global: 1.0,
            updates: 0,
        }
    }
}

impl FloatAccumulator {
    pub fn update(&mut self, value: f32) {
        self.updates = self.updates.saturating_add(1);
        match self.base {
            None => self.base = Some(f64::from(value)),
            // Later updates stack onto the first one.
            Some(_) => self.added += f64::from(value),
        }
    }

    pub fn add(&mut self, delta: f32) {
        self.added += f64::from(delta);
    }

    pub fn multiply(&mut self, factor: f32) {
        self.multiplier *= f64::from(factor);
    }

    pub fn multiply_all(&mut self, factor: f32) {
        self.global *= f64::from(factor);
    }

    /// Number of `update` calls seen this pass.
    pub fn update_count(&self) -> u32 {
        self.updates
    }

    /// Unclamped value: `(base or default + additions) × local × global`.
    pub fn resolve(&self, default: f32) -> f32 {
        let base = self.base.unwrap_or_else(|| f64::from(default));
        ((base + self.added) * self.multiplier * self.global) as f32
    }
}

/// Collects stat contributions for one tool and resolves them.
///
/// A builder lives for a single computation: create it, let every stat hook
/// contribute, call [`build`](Self::build), drop it.
#[derive(Clone, Debug, Default)]
pub struct ModifierStatsBuilder {
    floats: BTreeMap<StatId, (FloatStat, FloatAccumulator)>,
    tiers: BTreeMap<StatId, (TierStat, u32)>,
}

impl ModifierStatsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn float(&mut self, stat: &FloatStat) -> &mut FloatAccumulator {
        &mut self
            .floats
            .entry(stat.id().clone())
            .or_insert_with(|| (stat.clone(), FloatAccumulator::default()))
            .1
    }

    pub(crate) fn float_value(&self, stat: &FloatStat) -> f32 {
        match self.floats.get(stat.id().as_str()) {
            Some((_, accumulator)) => stat.clamp(accumulator.resolve(stat.default_value())),
            None => stat.default_value(),
        }
    }

    pub(crate) fn raise_tier(&mut self, stat: &TierStat, tier: u32) {
        self.tiers
            .entry(stat.id().clone())
            .and_modify(|(_, best)| *best = (*best).max(tier))
            .or_insert_with(|| (stat.clone(), tier));
    }

    pub(crate) fn tier_value(&self, stat: &TierStat) -> u32 {
        self.tiers
            .get(stat.id().as_str())
            .map_or(stat.default_value(), |(_, tier)| *tier)
    }

    /// Returns true if any contribution touched the stat.
    pub fn contains(&self, id: &str) -> bool {
        self.floats.contains_key(id) || self.tiers.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.floats.is_empty() && self.tiers.is_empty()
    }

    /// Float stats that received more than one `update` this pass.
    pub fn repeated_updates(&self) -> impl Iterator<Item = &StatId> + '_ {
        self.floats
            .iter()
            .filter(|(_, (_, accumulator))| accumulator.update_count() > 1)
            .map(|(id, _)| id)
    }

    /// Resolves every touched stat.
    ///
    /// Stats resolving to their default are omitted. With `item` given, stats
    /// whose scope the item does not match are dropped too.
    pub fn build(&self, item: Option<&ItemProfile>) -> ToolStats {
        let mut stats = ToolStats::default();

        for (id, (stat, accumulator)) in &self.floats {
            if item.is_some_and(|item| !stat.supports(item)) {
                continue;
            }
            let value = stat.clamp(accumulator.resolve(stat.default_value()));
            if value != stat.default_value() {
                stats.insert(id.clone(), stat.write(value));
            }
        }

        for (id, (stat, tier)) in &self.tiers {
            if item.is_some_and(|item| !stat.supports(item)) {
                continue;
            }
            if *tier != stat.default_value() {
                stats.insert(id.clone(), stat.write(*tier));
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::ItemPredicate;

    fn damage() -> FloatStat {
        FloatStat::new("attack_damage", 0.0)
    }

    #[test]
    fn update_then_multiply() {
        let stat = damage();
        let mut builder = ModifierStatsBuilder::new();
        stat.multiply(&mut builder, 1.5);
        stat.update(&mut builder, 3.0);
        assert_eq!(stat.get(&builder), 4.5);
        assert_eq!(builder.build(None).get(&stat), 4.5);
    }

    #[test]
    fn operations_apply_in_fixed_order() {
        let stat = FloatStat::new("durability", 10.0);
        let mut builder = ModifierStatsBuilder::new();
        stat.multiply_all(&mut builder, 2.0);
        stat.add(&mut builder, 5.0);
        stat.multiply(&mut builder, 3.0);
        // (10 + 5) * 3 * 2
        assert_eq!(stat.get(&builder), 90.0);
    }

    #[test]
    fn second_update_accumulates() {
        let stat = damage();
        let mut builder = ModifierStatsBuilder::new();
        stat.update(&mut builder, 3.0);
        stat.update(&mut builder, 2.0);
        assert_eq!(stat.get(&builder), 5.0);
        assert_eq!(
            builder.repeated_updates().collect::<Vec<_>>(),
            vec![&StatId::new("attack_damage")]
        );
    }

    #[test]
    fn defaults_are_omitted() {
        let stat = FloatStat::new("durability", 100.0);
        let tier = TierStat::new("harvest_tier", 1);
        let mut builder = ModifierStatsBuilder::new();
        stat.add(&mut builder, 0.0);
        tier.update(&mut builder, 1);
        assert!(builder.contains("durability"));
        assert!(builder.build(None).is_empty());
    }

    #[test]
    fn clamping_applies_before_default_check() {
        let stat = FloatStat::new("speed", 0.0).with_range(0.0, 10.0);
        let mut builder = ModifierStatsBuilder::new();
        stat.add(&mut builder, -4.0);
        assert!(builder.build(None).is_empty());
        stat.add(&mut builder, 50.0);
        assert_eq!(builder.build(None).get(&stat), 10.0);
    }

    #[test]
    fn item_scope_filters_stats() {
        let mining = FloatStat::new("mining_speed", 1.0).with_scope(ItemPredicate::tag("harvest"));
        let damage = damage();
        let mut builder = ModifierStatsBuilder::new();
        mining.update(&mut builder, 6.0);
        damage.update(&mut builder, 4.0);

        let sword = ItemProfile::new().with_tag("melee");
        let stats = builder.build(Some(&sword));
        assert!(!stats.contains("mining_speed"));
        assert_eq!(stats.get(&damage), 4.0);

        let unfiltered = builder.build(None);
        assert_eq!(unfiltered.get(&mining), 6.0);
    }

    #[test]
    fn untouched_stat_reads_default() {
        let stat = FloatStat::new("durability", 100.0);
        let builder = ModifierStatsBuilder::new();
        assert_eq!(stat.get(&builder), 100.0);
        assert!(builder.is_empty());
    }
}
