//! Stock stats shared by every tool definition.

use std::sync::LazyLock;

use forge_core::{FloatStat, ItemPredicate, StatError, StatFormat, StatRegistry, TierStat};

/// Item tag for tools that break blocks.
pub const HARVEST: &str = "harvest";
/// Item tag for weapons and tools that hit.
pub const MELEE: &str = "melee";

pub static DURABILITY: LazyLock<FloatStat> =
    LazyLock::new(|| FloatStat::new("durability", 1.0).with_range(1.0, f32::MAX));

pub static ATTACK_DAMAGE: LazyLock<FloatStat> = LazyLock::new(|| {
    FloatStat::new("attack_damage", 0.0)
        .with_range(0.0, 2048.0)
        .with_scope(ItemPredicate::tag(MELEE))
});

pub static ATTACK_SPEED: LazyLock<FloatStat> = LazyLock::new(|| {
    FloatStat::new("attack_speed", 1.0)
        .with_range(0.0, 1024.0)
        .with_format(StatFormat::Multiplier)
        .with_scope(ItemPredicate::tag(MELEE))
});

pub static MINING_SPEED: LazyLock<FloatStat> = LazyLock::new(|| {
    FloatStat::new("mining_speed", 1.0)
        .with_range(0.1, 2048.0)
        .with_scope(ItemPredicate::tag(HARVEST))
});

pub static HARVEST_TIER: LazyLock<TierStat> = LazyLock::new(|| {
    TierStat::new("harvest_tier", 0)
        .with_names(["wood", "stone", "iron", "diamond", "netherite"])
        .with_scope(ItemPredicate::tag(HARVEST))
});

/// Looks up a stock float stat by id.
pub fn float_stat(id: &str) -> Option<&'static FloatStat> {
    [&DURABILITY, &ATTACK_DAMAGE, &ATTACK_SPEED, &MINING_SPEED]
        .into_iter()
        .map(|stat| &**stat)
        .find(|stat| stat.id().as_str() == id)
}

/// Looks up a stock tier stat by id.
pub fn tier_stat(id: &str) -> Option<&'static TierStat> {
    (HARVEST_TIER.id().as_str() == id).then(|| &*HARVEST_TIER)
}

/// Registry of every stock stat.
///
/// # Errors
///
/// Only fails if two stock stats share an id.
pub fn stat_registry() -> Result<StatRegistry, StatError> {
    let mut registry = StatRegistry::new();
    registry.register(DURABILITY.clone())?;
    registry.register(ATTACK_DAMAGE.clone())?;
    registry.register(ATTACK_SPEED.clone())?;
    registry.register(MINING_SPEED.clone())?;
    registry.register(HARVEST_TIER.clone())?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::{ItemProfile, ToolStat};

    #[test]
    fn lookups_cover_registry() {
        let registry = stat_registry().unwrap();
        for id in registry.ids() {
            assert!(
                float_stat(id.as_str()).is_some() || tier_stat(id.as_str()).is_some(),
                "{id} has no lookup"
            );
        }
        assert!(float_stat("harvest_tier").is_none());
        assert!(tier_stat("durability").is_none());
    }

    #[test]
    fn scopes_follow_item_tags() {
        let sword = ItemProfile::new().with_tag(MELEE);
        assert!(ATTACK_DAMAGE.supports(&sword));
        assert!(!MINING_SPEED.supports(&sword));
        assert!(DURABILITY.supports(&sword));
    }
}
