//! Resolved-stats service over the live definitions.

use std::num::NonZeroU32;
use std::sync::Arc;

use forge_content::hooks::TOOLTIP;
use forge_core::{
    DefinitionId, DoubleUpdatePolicy, MaterialId, MaterialStatsCache, MaterialStatsSource,
    ModifierId, ModifierList, ReloadCache, StatRegistry, ToolContext, ToolDefinition, ToolStats,
    collect_stats, ordered_modifiers,
};
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::registry::{DefinitionRegistry, DefinitionSnapshot};
use crate::source::DefinitionSource;

/// Persisted state of one item: what it is, what it is made of and which
/// modifiers it carries.
///
/// Everything else about the item is derived from this and the live
/// definitions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ItemState {
    pub definition: DefinitionId,
    #[serde(default)]
    pub materials: Vec<MaterialId>,
    #[serde(default)]
    pub modifiers: ModifierList,
}

impl ItemState {
    pub fn new(definition: impl Into<DefinitionId>) -> Self {
        Self {
            definition: definition.into(),
            materials: Vec::new(),
            modifiers: ModifierList::new(),
        }
    }

    /// One material per part, in part order (builder pattern).
    #[must_use]
    pub fn with_materials<I, M>(mut self, materials: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MaterialId>,
    {
        self.materials = materials.into_iter().map(Into::into).collect();
        self
    }

    /// Adds `levels` of a modifier, stacking onto an existing entry.
    #[must_use]
    pub fn with_modifier(mut self, id: impl Into<ModifierId>, levels: NonZeroU32) -> Self {
        self.modifiers.add(id, levels);
        self
    }
}

/// Resolves [`ItemState`]s to stats, memoizing results per data generation.
///
/// Reloads and material changes go through the service so that every cache
/// it owns is cleared together.
#[derive(Debug)]
pub struct StatsService {
    registry: DefinitionRegistry,
    materials: MaterialStatsCache,
    stats: ReloadCache<ItemState, Arc<ToolStats>>,
}

impl StatsService {
    pub fn new(registry: DefinitionRegistry, materials: Arc<dyn MaterialStatsSource>) -> Self {
        Self {
            registry,
            materials: MaterialStatsCache::new(materials),
            stats: ReloadCache::new(),
        }
    }

    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RuntimeConfig {
        self.registry.config()
    }

    pub fn snapshot(&self) -> Arc<DefinitionSnapshot> {
        self.registry.snapshot()
    }

    /// Number of memoized item stats.
    pub fn cached(&self) -> usize {
        self.stats.len()
    }

    /// Reloads definitions from `source` and drops every cached lookup.
    ///
    /// Returns the new definition generation.
    ///
    /// # Errors
    ///
    /// Only with `strict_definitions` set; the previous definitions and
    /// caches stay untouched in that case.
    pub fn reload(&self, source: &dyn DefinitionSource) -> Result<u64> {
        let snapshot = self.registry.reload(source)?;
        self.clear_caches(snapshot.generation());
        Ok(snapshot.generation())
    }

    /// Drops cached material lookups and every stat derived from them.
    ///
    /// Call after the material source changed underneath the service.
    pub fn invalidate_materials(&self) {
        let generation = self.registry.generation();
        self.clear_caches(generation);
    }

    fn clear_caches(&self, definitions: u64) {
        // Materials first: a reader that captured the new stats generation
        // must not see old material values.
        let materials = self.materials.clear();
        let stats = self.stats.clear();
        info!(
            target: "forge::cache",
            definitions,
            materials,
            stats,
            "Caches cleared"
        );
    }

    /// Resolved stats of `item`.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::UnknownDefinition`] if no live definition has the
    /// item's definition id.
    pub fn stats(&self, item: &ItemState) -> Result<Arc<ToolStats>> {
        if !self.config().forge.cache_stats {
            let snapshot = self.registry.snapshot();
            return self.resolve(&snapshot, item).map(Arc::new);
        }

        // Capture the generation before reading the snapshot so a concurrent
        // reload can never leave stats of old definitions in the cache.
        let generation = self.stats.generation();
        let snapshot = self.registry.snapshot();

        if let Some(stats) = self.stats.get(item) {
            return Ok(stats);
        }

        let stats = Arc::new(self.resolve(&snapshot, item)?);
        Ok(self
            .stats
            .get_or_insert_at(generation, item.clone(), move || stats))
    }

    /// Tooltip of `item`: definition lines, then modifier lines in
    /// application order, then one line per non-default stat.
    ///
    /// # Errors
    ///
    /// See [`stats`](Self::stats).
    pub fn tooltip(&self, item: &ItemState, stat_registry: &StatRegistry) -> Result<Vec<String>> {
        let snapshot = self.registry.snapshot();
        let definition = Self::definition(&snapshot, item)?;
        let context = self.context(definition, item).with_modifiers(&item.modifiers);

        let mut lines = definition.hooks().get(&TOOLTIP).tooltip(&context);
        for (modifier, _) in ordered_modifiers(&item.modifiers, snapshot.modifiers()) {
            lines.extend(modifier.hooks().get(&TOOLTIP).tooltip(&context));
        }
        lines.extend(self.stats(item)?.tooltip(stat_registry));
        Ok(lines)
    }

    fn definition<'s>(
        snapshot: &'s DefinitionSnapshot,
        item: &ItemState,
    ) -> Result<&'s Arc<ToolDefinition>> {
        snapshot
            .definition(item.definition.as_str())
            .ok_or_else(|| {
                warn!(
                    target: "forge::stats",
                    definition = %item.definition,
                    generation = snapshot.generation(),
                    "Item refers to an unknown definition"
                );
                RuntimeError::UnknownDefinition(item.definition.clone())
            })
    }

    fn context<'a>(&'a self, definition: &'a ToolDefinition, item: &'a ItemState) -> ToolContext<'a> {
        ToolContext::new(definition)
            .with_materials(&item.materials)
            .with_material_stats(&self.materials)
    }

    fn resolve(&self, snapshot: &DefinitionSnapshot, item: &ItemState) -> Result<ToolStats> {
        let definition = Self::definition(snapshot, item)?;

        for entry in item.modifiers.iter() {
            if snapshot.modifiers().get(entry.id().as_str()).is_none() {
                debug!(
                    target: "forge::stats",
                    definition = %item.definition,
                    modifier = %entry.id(),
                    "Skipping unknown modifier"
                );
            }
        }

        let context = self.context(definition, item);
        let builder = collect_stats(definition, &item.modifiers, &context, snapshot.modifiers());

        if self.config().forge.double_update == DoubleUpdatePolicy::Warn {
            for stat in builder.repeated_updates() {
                warn!(
                    target: "forge::stats",
                    definition = %item.definition,
                    stat = %stat,
                    "Stat set more than once, later values were added"
                );
            }
        }

        Ok(builder.build(Some(definition.item())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_content::{Catalog, hook_registry};

    fn service() -> StatsService {
        let catalog = Catalog::sample();
        let registry = DefinitionRegistry::new(hook_registry().unwrap(), RuntimeConfig::default());
        let service = StatsService::new(registry, Arc::new(catalog.materials.clone()));
        service.reload(&catalog).unwrap();
        service
    }

    #[test]
    fn item_state_stacks_modifier_levels() {
        let one = NonZeroU32::MIN;
        let item = ItemState::new("pickaxe")
            .with_modifier("haste", one)
            .with_modifier("haste", one);
        assert_eq!(item.modifiers.level_of("haste"), 2);
    }

    #[test]
    fn unknown_definition_is_an_error() {
        let err = service().stats(&ItemState::new("trident")).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownDefinition(id) if id.as_str() == "trident"));
    }

    #[test]
    fn results_are_memoized() {
        let service = service();
        let item = ItemState::new("pickaxe").with_materials(["iron", "wood"]);
        let first = service.stats(&item).unwrap();
        let second = service.stats(&item).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(service.cached(), 1);
    }

    #[test]
    fn invalidating_materials_keeps_definitions() {
        let service = service();
        let item = ItemState::new("pickaxe").with_materials(["iron", "wood"]);
        let before = service.stats(&item).unwrap();
        assert_eq!(service.cached(), 1);

        service.invalidate_materials();
        assert_eq!(service.cached(), 0);
        assert_eq!(service.snapshot().generation(), 1);

        let after = service.stats(&item).unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(before, after);
    }

    #[test]
    fn tooltip_lists_definition_modifier_and_stat_lines() {
        let service = service();
        let item = ItemState::new("pickaxe")
            .with_materials(["wood", "wood"])
            .with_modifier("sharpness", NonZeroU32::MIN);
        let lines = service
            .tooltip(&item, &forge_content::stat_registry().unwrap())
            .unwrap();
        assert_eq!(
            lines,
            vec![
                "Breaks stone and ore",
                "Sharpness",
                "attack_damage: 0.5",
                "attack_speed: 1.2x",
                "durability: 60",
                "mining_speed: 2",
            ]
        );
    }
}
