//! Stacking modifiers and the persisted lists that apply them to a tool.

use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::definition::DefinitionError;
use crate::hook::{HookMap, HookMapBuilder, HookRegistry};
use crate::id::ModifierId;
use crate::module::ModuleSet;

/// Priority groups for modules and modifiers. Lower values run first.
pub mod priority {
    /// Flat boosts (`add`, base `update`).
    pub const FLAT: i32 = 0;
    /// Percentage multipliers.
    pub const MULTIPLIER: i32 = 50;
    /// Global multipliers applied after every other group.
    pub const GLOBAL: i32 = 100;
    pub const DEFAULT: i32 = FLAT;
}

/// One modifier applied to a tool at some level.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierEntry {
    id: ModifierId,
    level: NonZeroU32,
}

impl ModifierEntry {
    pub fn new(id: impl Into<ModifierId>, level: NonZeroU32) -> Self {
        Self {
            id: id.into(),
            level,
        }
    }

    /// Entry at level 1.
    pub fn single(id: impl Into<ModifierId>) -> Self {
        Self::new(id, NonZeroU32::MIN)
    }

    /// Entry at `level`, or `None` for level 0.
    pub fn at_level(id: impl Into<ModifierId>, level: u32) -> Option<Self> {
        NonZeroU32::new(level).map(|level| Self::new(id, level))
    }

    pub fn id(&self) -> &ModifierId {
        &self.id
    }

    pub fn level(&self) -> u32 {
        self.level.get()
    }
}

/// Ordered modifiers on one tool. The order is persisted state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ModifierList {
    entries: Vec<ModifierEntry>,
}

pub(crate) static NO_MODIFIERS: ModifierList = ModifierList {
    entries: Vec::new(),
};

impl ModifierList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry (builder pattern).
    #[must_use]
    pub fn with(mut self, entry: ModifierEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Adds `levels` to an existing entry, or appends a new one.
    pub fn add(&mut self, id: impl Into<ModifierId>, levels: NonZeroU32) {
        let id = id.into();
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.level = entry.level.saturating_add(levels.get()),
            None => self.entries.push(ModifierEntry::new(id, levels)),
        }
    }

    /// Removes an entry, returning it.
    pub fn remove(&mut self, id: &str) -> Option<ModifierEntry> {
        let index = self.entries.iter().position(|entry| entry.id.as_str() == id)?;
        Some(self.entries.remove(index))
    }

    /// Level of `id`, or 0 when absent.
    pub fn level_of(&self, id: &str) -> u32 {
        self.entries
            .iter()
            .find(|entry| entry.id.as_str() == id)
            .map_or(0, ModifierEntry::level)
    }

    pub fn entries(&self) -> &[ModifierEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ModifierEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ModifierEntry> for ModifierList {
    fn from_iter<I: IntoIterator<Item = ModifierEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A modifier definition: its modules and their merged hooks.
#[derive(Debug)]
pub struct Modifier {
    id: ModifierId,
    priority: i32,
    modules: ModuleSet,
    hooks: HookMap,
}

impl Modifier {
    /// Builds the hook map for `modules`.
    ///
    /// # Errors
    ///
    /// Returns the first hook configuration error, tagged with the modifier id.
    pub fn build(
        id: impl Into<ModifierId>,
        priority: i32,
        modules: ModuleSet,
        registry: &HookRegistry,
    ) -> Result<Self, DefinitionError> {
        let id = id.into();
        let hooks = HookMapBuilder::new(registry)
            .build(&modules)
            .map_err(|source| DefinitionError::Hooks {
                owner: id.to_string(),
                source,
            })?;
        Ok(Self {
            id,
            priority,
            modules,
            hooks,
        })
    }

    pub fn id(&self) -> &ModifierId {
        &self.id
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn modules(&self) -> &ModuleSet {
        &self.modules
    }

    pub fn hooks(&self) -> &HookMap {
        &self.hooks
    }
}

/// Resolves modifier ids found in persisted lists.
pub trait ModifierLookup {
    fn modifier(&self, id: &str) -> Option<Arc<Modifier>>;
}

/// In-memory modifier table.
#[derive(Debug, Default)]
pub struct ModifierRegistry {
    modifiers: BTreeMap<ModifierId, Arc<Modifier>>,
}

impl ModifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a modifier, returning the one it replaced.
    pub fn insert(&mut self, modifier: Modifier) -> Option<Arc<Modifier>> {
        self.modifiers
            .insert(modifier.id().clone(), Arc::new(modifier))
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Modifier>> {
        self.modifiers.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ModifierId> + '_ {
        self.modifiers.keys()
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }
}

impl ModifierLookup for ModifierRegistry {
    fn modifier(&self, id: &str) -> Option<Arc<Modifier>> {
        self.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn add_stacks_levels_in_place() {
        let mut list = ModifierList::new()
            .with(ModifierEntry::single("sharpness"))
            .with(ModifierEntry::single("reinforced"));
        list.add("sharpness", level(2));
        list.add("haste", level(1));

        let ids: Vec<_> = list.iter().map(|entry| entry.id().as_str()).collect();
        assert_eq!(ids, vec!["sharpness", "reinforced", "haste"]);
        assert_eq!(list.level_of("sharpness"), 3);
        assert_eq!(list.level_of("missing"), 0);
    }

    #[test]
    fn zero_level_is_not_an_entry() {
        assert!(ModifierEntry::at_level("sharpness", 0).is_none());
        assert_eq!(ModifierEntry::at_level("sharpness", 4).unwrap().level(), 4);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut list: ModifierList = ["a", "b", "c"].into_iter().map(ModifierEntry::single).collect();
        assert_eq!(list.remove("b").map(|entry| entry.level()), Some(1));
        assert!(list.remove("b").is_none());
        assert_eq!(list.entries()[1].id().as_str(), "c");
    }

    #[test]
    fn registry_lookup() {
        let registry_hooks = HookRegistry::with_core_hooks();
        let mut registry = ModifierRegistry::new();
        let modifier = Modifier::build("haste", priority::MULTIPLIER, ModuleSet::new(), &registry_hooks)
            .unwrap();
        assert!(registry.insert(modifier).is_none());
        assert_eq!(registry.modifier("haste").unwrap().priority(), 50);
        assert!(registry.modifier("unknown").is_none());
    }
}
