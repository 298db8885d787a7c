//! Property-based tests for hook merging and material aggregation.

use std::sync::{Arc, LazyLock};

use forge_core::*;
use proptest::prelude::*;

// ===========================================================================
// Fixtures
// ===========================================================================

trait SlotsHook: Send + Sync {
    fn slots(&self) -> i32;
}

trait UsableHook: Send + Sync {
    fn usable(&self) -> bool;
}

struct NoSlots;
impl SlotsHook for NoSlots {
    fn slots(&self) -> i32 {
        0
    }
}

struct NotUsable;
impl UsableHook for NotUsable {
    fn usable(&self) -> bool {
        false
    }
}

impl SlotsHook for AllMerger<dyn SlotsHook> {
    fn slots(&self) -> i32 {
        self.sum_by(0, |hook| hook.slots())
    }
}

impl UsableHook for AllMerger<dyn UsableHook> {
    fn usable(&self) -> bool {
        self.any(|hook| hook.usable())
    }
}

fn merge_slots(hooks: Vec<Arc<dyn SlotsHook>>) -> Arc<dyn SlotsHook> {
    Arc::new(AllMerger::new(hooks))
}

fn merge_usable(hooks: Vec<Arc<dyn UsableHook>>) -> Arc<dyn UsableHook> {
    Arc::new(AllMerger::new(hooks))
}

static SLOTS: LazyLock<ModuleHook<dyn SlotsHook>> = LazyLock::new(|| {
    ModuleHook::<dyn SlotsHook>::with_merger("test:slots", Arc::new(NoSlots), merge_slots)
});

static USABLE: LazyLock<ModuleHook<dyn UsableHook>> = LazyLock::new(|| {
    ModuleHook::<dyn UsableHook>::with_merger("test:usable", Arc::new(NotUsable), merge_usable)
});

/// Contributes slots, usability and a flat damage bonus.
#[derive(Debug)]
struct Part {
    slots: i32,
    usable: bool,
    damage: i16,
}

impl SlotsHook for Part {
    fn slots(&self) -> i32 {
        self.slots
    }
}

impl UsableHook for Part {
    fn usable(&self) -> bool {
        self.usable
    }
}

impl ToolStatsHook for Part {
    fn add_tool_stats(&self, _context: &ToolContext<'_>, stats: &mut ModifierStatsBuilder) {
        damage().add(stats, f32::from(self.damage));
    }
}

impl Module for Part {
    fn kind(&self) -> &'static str {
        "part"
    }

    fn default_hooks(&self) -> Vec<HookId> {
        vec![
            SLOTS.id().clone(),
            USABLE.id().clone(),
            TOOL_STATS.id().clone(),
        ]
    }

    fn provide_hooks(self: Arc<Self>, hooks: &mut HookProvider) {
        hooks
            .provide(&SLOTS, self.clone() as Arc<dyn SlotsHook>)
            .provide(&USABLE, self.clone() as Arc<dyn UsableHook>)
            .provide(&TOOL_STATS, self as Arc<dyn ToolStatsHook>);
    }
}

fn damage() -> FloatStat {
    FloatStat::new("attack_damage", 0.0).with_range(f32::MIN, f32::MAX)
}

fn registry() -> HookRegistry {
    let mut registry = HookRegistry::with_core_hooks();
    registry.register(SLOTS.clone()).unwrap();
    registry.register(USABLE.clone()).unwrap();
    registry
}

fn build(registry: &HookRegistry, parts: &[(i32, bool, i16)]) -> ToolDefinition {
    let modules = parts
        .iter()
        .map(|&(slots, usable, damage)| {
            ModuleEntry::with_default_hooks(Arc::new(Part {
                slots,
                usable,
                damage,
            }))
        })
        .collect();
    ToolDefinition::build("tool", ItemProfile::new(), modules, registry).unwrap()
}

struct Uniform(f32);

impl MaterialStatsSource for Uniform {
    fn stats(&self, _material: &MaterialId, _stat_type: &MaterialStatsId) -> Option<MaterialStats> {
        Some(MaterialStats::new().with("durability", self.0))
    }

    fn default_stats(&self, _stat_type: &MaterialStatsId) -> MaterialStats {
        MaterialStats::new()
    }
}

// ===========================================================================
// Generators
// ===========================================================================

fn arb_parts() -> impl Strategy<Value = (Vec<(i32, bool, i16)>, Vec<(i32, bool, i16)>)> {
    proptest::collection::vec((-50..50i32, any::<bool>(), any::<i16>()), 0..8)
        .prop_flat_map(|parts| (Just(parts.clone()), Just(parts).prop_shuffle()))
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Reordering same-priority modules does not change sum, union or
    /// additive stat results.
    #[test]
    fn same_priority_order_is_irrelevant((parts, shuffled) in arb_parts()) {
        let registry = registry();
        let a = build(&registry, &parts);
        let b = build(&registry, &shuffled);

        prop_assert_eq!(a.hooks().get(&SLOTS).slots(), b.hooks().get(&SLOTS).slots());
        prop_assert_eq!(a.hooks().get(&USABLE).usable(), b.hooks().get(&USABLE).usable());

        let lookup = ModifierRegistry::new();
        let none = ModifierList::new();
        prop_assert_eq!(
            resolve_stats(&a, &none, &ToolContext::new(&a), &lookup),
            resolve_stats(&b, &none, &ToolContext::new(&b), &lookup)
        );
    }

    /// A part of weight `w` counts as `w` identical parts.
    #[test]
    fn weight_is_replication(value in 0u16..10_000, weight in 1u32..64) {
        let value = f32::from(value) / 4.0;
        let summed = FloatStat::new("summed", 0.0);
        let averaged = FloatStat::new("averaged", 0.0);
        let provider = MaterialStatProvider::new("single", ["head"])
            .with_formula(StatFormula::new(summed.clone(), "durability").aggregate(Aggregation::Sum))
            .with_formula(StatFormula::new(averaged.clone(), "durability"));

        let cache = MaterialStatsCache::new(Arc::new(Uniform(value)));
        let weighted = vec![WeightedStatType::weighted("head", Weight::new(weight).unwrap())];
        let mut builder = ModifierStatsBuilder::new();
        provider.apply(&weighted, &[MaterialId::new("any")], &cache, &mut builder);

        prop_assert_eq!(averaged.get(&builder), value);
        prop_assert_eq!(summed.get(&builder), (f64::from(value) * f64::from(weight)) as f32);

        // Same as `weight` separate parts.
        let repeated: Vec<_> = (0..weight).map(|_| WeightedStatType::new("head")).collect();
        let materials: Vec<_> = (0..weight).map(|_| MaterialId::new("any")).collect();
        let mut split = ModifierStatsBuilder::new();
        provider.apply(&repeated, &materials, &cache, &mut split);
        prop_assert_eq!(builder.build(None), split.build(None));
    }
}
