//! Sample content: materials, a material stat provider, tools and modifiers.
//!
//! Used by the developer CLI and by tests that need a realistic data set.

use std::collections::{BTreeMap, BTreeSet};

use forge_core::modifier::priority;
use forge_core::{
    Aggregation, DefinitionId, ItemPredicate, ItemProfile, MaterialId, MaterialStatProvider,
    MaterialStats, MaterialStatsId, MaterialStatsSource, StatFormula, StatOperation, Weight,
    WeightedStatType,
};

use crate::factory::ModuleFactory;
use crate::hooks::{Rarity, ToolAction};
use crate::spec::{DefinitionSpec, ModifierSpec, ModuleEntrySpec, ModuleSpec};
use crate::stats::{ATTACK_DAMAGE, ATTACK_SPEED, DURABILITY, HARVEST, HARVEST_TIER, MELEE, MINING_SPEED};

/// In-memory material stats keyed by `(material, stat type)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialTable {
    stats: BTreeMap<(MaterialId, MaterialStatsId), MaterialStats>,
    defaults: BTreeMap<MaterialStatsId, MaterialStats>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(
        mut self,
        material: impl Into<MaterialId>,
        stat_type: impl Into<MaterialStatsId>,
        stats: MaterialStats,
    ) -> Self {
        self.stats.insert((material.into(), stat_type.into()), stats);
        self
    }

    /// Stats used for materials lacking `stat_type` (builder pattern).
    #[must_use]
    pub fn with_default(mut self, stat_type: impl Into<MaterialStatsId>, stats: MaterialStats) -> Self {
        self.defaults.insert(stat_type.into(), stats);
        self
    }

    /// Every material with at least one stat type.
    pub fn materials(&self) -> BTreeSet<&MaterialId> {
        self.stats.keys().map(|(material, _)| material).collect()
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// wood, stone, iron and diamond heads; wood, stone and iron handles.
    pub fn sample() -> Self {
        let head = |durability, damage, speed, tier| {
            MaterialStats::new()
                .with("durability", durability)
                .with("attack_damage", damage)
                .with("mining_speed", speed)
                .with("tier", tier)
        };
        let handle = |durability, speed| {
            MaterialStats::new()
                .with("durability", durability)
                .with("attack_speed", speed)
        };
        Self::new()
            .with("wood", "head", head(60.0, 0.0, 2.0, 0.0))
            .with("stone", "head", head(131.0, 1.0, 4.0, 1.0))
            .with("iron", "head", head(250.0, 2.0, 6.0, 2.0))
            .with("diamond", "head", head(1561.0, 3.0, 8.0, 3.0))
            .with("wood", "handle", handle(1.0, 1.0))
            .with("stone", "handle", handle(0.9, 1.05))
            .with("iron", "handle", handle(1.1, 1.1))
            .with_default("head", head(1.0, 0.0, 1.0, 0.0))
    }
}

impl MaterialStatsSource for MaterialTable {
    fn stats(&self, material: &MaterialId, stat_type: &MaterialStatsId) -> Option<MaterialStats> {
        self.stats
            .get(&(material.clone(), stat_type.clone()))
            .cloned()
    }

    fn default_stats(&self, stat_type: &MaterialStatsId) -> MaterialStats {
        self.defaults.get(stat_type).cloned().unwrap_or_default()
    }
}

/// Provider for head + handle tools.
///
/// Heads set durability, damage, mining speed and tier; handles scale
/// durability and attack speed.
pub fn melee_harvest() -> MaterialStatProvider {
    MaterialStatProvider::new("melee_harvest", ["head"])
        .with_other(["handle", "binding"])
        .with_formula(StatFormula::new(DURABILITY.clone(), "durability").from_types(["head"]))
        .with_formula(
            StatFormula::new(DURABILITY.clone(), "durability")
                .from_types(["handle"])
                .operation(StatOperation::Multiply)
                .fallback(1.0),
        )
        .with_formula(StatFormula::new(ATTACK_DAMAGE.clone(), "attack_damage").from_types(["head"]))
        .with_formula(StatFormula::new(MINING_SPEED.clone(), "mining_speed").from_types(["head"]))
        .with_formula(
            StatFormula::new(HARVEST_TIER.clone(), "tier")
                .from_types(["head"])
                .aggregate(Aggregation::Max),
        )
        .with_formula(
            StatFormula::new(ATTACK_SPEED.clone(), "attack_speed")
                .from_types(["handle"])
                .operation(StatOperation::Multiply)
                .fallback(1.0),
        )
}

fn parts(slots: &[(&'static str, u32)]) -> Vec<WeightedStatType> {
    slots
        .iter()
        .map(|&(stat_type, weight)| {
            WeightedStatType::weighted(stat_type, Weight::new(weight).unwrap_or_default())
        })
        .collect()
}

fn stats<const N: usize>(values: [(&str, f32); N]) -> BTreeMap<String, f32> {
    values
        .into_iter()
        .map(|(id, value)| (id.to_string(), value))
        .collect()
}

fn boost(stat: &str, operation: StatOperation, value: f32) -> ModuleSpec {
    ModuleSpec::StatBoost {
        stat: stat.to_string(),
        operation,
        value,
        condition: ItemPredicate::Any,
    }
}

/// pickaxe, sword and hatchet.
pub fn sample_definitions() -> Vec<DefinitionSpec> {
    vec![
        DefinitionSpec {
            id: DefinitionId::from_static("pickaxe"),
            item: ItemProfile::new().with_tag(HARVEST).with_tag(MELEE),
            modules: vec![
                ModuleSpec::SetStats {
                    stats: stats([("attack_speed", 1.2)]),
                    tiers: BTreeMap::new(),
                }
                .into(),
                ModuleSpec::MaterialStats {
                    provider: "melee_harvest".to_string(),
                    parts: parts(&[("head", 2), ("handle", 1)]),
                }
                .into(),
                ModuleSpec::ToolAction {
                    actions: vec![ToolAction::Dig],
                }
                .into(),
                ModuleSpec::Slots { slots: 3 }.into(),
                ModuleSpec::Tooltip {
                    lines: vec!["Breaks stone and ore".to_string()],
                }
                .into(),
            ],
        },
        DefinitionSpec {
            id: DefinitionId::from_static("sword"),
            item: ItemProfile::new().with_tag(MELEE),
            modules: vec![
                ModuleSpec::SetStats {
                    stats: stats([("attack_speed", 1.6)]),
                    tiers: BTreeMap::new(),
                }
                .into(),
                ModuleSpec::MaterialStats {
                    provider: "melee_harvest".to_string(),
                    parts: parts(&[("head", 2), ("handle", 1)]),
                }
                .into(),
                // Blade bonus on top of the head material.
                ModuleEntrySpec::new(boost("attack_damage", StatOperation::Add, 3.0))
                    .with_hooks(["forge:tool_stats"]),
                ModuleSpec::Interaction {
                    target: "cobweb".into(),
                    message: "cut the cobweb".to_string(),
                }
                .into(),
                ModuleSpec::Slots { slots: 2 }.into(),
                ModuleSpec::Rarity {
                    rarity: Rarity::Uncommon,
                }
                .into(),
            ],
        },
        DefinitionSpec {
            id: DefinitionId::from_static("hatchet"),
            item: ItemProfile::new().with_tag(HARVEST).with_tag(MELEE),
            modules: vec![
                ModuleSpec::MaterialStats {
                    provider: "melee_harvest".to_string(),
                    parts: parts(&[("head", 1), ("handle", 1)]),
                }
                .into(),
                ModuleSpec::ToolAction {
                    actions: vec![ToolAction::Strip],
                }
                .into(),
                ModuleSpec::Interaction {
                    target: "log".into(),
                    message: "stripped the log".to_string(),
                }
                .into(),
                ModuleSpec::Slots { slots: 3 }.into(),
            ],
        },
    ]
}

/// sharpness, haste, reinforced, diamond and brittle.
pub fn sample_modifiers() -> Vec<ModifierSpec> {
    vec![
        ModifierSpec::new(
            "sharpness",
            vec![
                boost("attack_damage", StatOperation::Add, 0.5).into(),
                ModuleEntrySpec::new(ModuleSpec::Tooltip {
                    lines: vec!["Sharpness".to_string()],
                }),
            ],
        ),
        ModifierSpec::new(
            "haste",
            vec![
                ModuleSpec::StatBoost {
                    stat: "mining_speed".to_string(),
                    operation: StatOperation::Multiply,
                    value: 0.25,
                    condition: ItemPredicate::tag(HARVEST),
                }
                .into(),
            ],
        )
        .with_priority(priority::MULTIPLIER),
        ModifierSpec::new(
            "reinforced",
            vec![boost("durability", StatOperation::Add, 50.0).into()],
        ),
        ModifierSpec::new(
            "diamond",
            vec![
                ModuleEntrySpec::new(ModuleSpec::SetStats {
                    stats: BTreeMap::new(),
                    tiers: [("harvest_tier".to_string(), 3)].into_iter().collect(),
                })
                .with_hooks(["forge:modifier_stats"]),
                boost("durability", StatOperation::Add, 500.0).into(),
            ],
        ),
        ModifierSpec::new(
            "brittle",
            vec![boost("durability", StatOperation::MultiplyAll, -0.25).into()],
        )
        .with_priority(priority::GLOBAL),
    ]
}

/// Everything the sample content needs in one place.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub materials: MaterialTable,
    pub providers: Vec<MaterialStatProvider>,
    pub definitions: Vec<DefinitionSpec>,
    pub modifiers: Vec<ModifierSpec>,
}

impl Catalog {
    pub fn sample() -> Self {
        Self {
            materials: MaterialTable::sample(),
            providers: vec![melee_harvest()],
            definitions: sample_definitions(),
            modifiers: sample_modifiers(),
        }
    }

    /// A factory knowing every provider of the catalog.
    pub fn factory(&self) -> ModuleFactory {
        let mut factory = ModuleFactory::new();
        for provider in &self.providers {
            factory.add_provider(provider.clone());
        }
        factory
    }

    pub fn definition(&self, id: &str) -> Option<&DefinitionSpec> {
        self.definitions.iter().find(|spec| spec.id.as_str() == id)
    }
}
