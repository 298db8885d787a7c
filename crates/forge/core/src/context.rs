use crate::definition::ToolDefinition;
use crate::id::MaterialId;
use crate::material::MaterialStatsCache;
use crate::modifier::{ModifierList, NO_MODIFIERS};
use crate::predicate::{ItemProfile, UNTAGGED};

/// Read-only view of the tool a stat or behavior hook runs for.
///
/// Cheap to copy; everything is borrowed from the caller.
#[derive(Clone, Copy, Debug)]
pub struct ToolContext<'a> {
    item: &'a ItemProfile,
    materials: &'a [MaterialId],
    modifiers: &'a ModifierList,
    material_stats: Option<&'a MaterialStatsCache>,
}

impl<'a> ToolContext<'a> {
    /// Context for an instance of `definition` with no materials or modifiers.
    pub fn new(definition: &'a ToolDefinition) -> Self {
        Self {
            item: definition.item(),
            ..Self::detached()
        }
    }

    /// Context not tied to any definition.
    pub fn detached() -> Self {
        Self {
            item: &UNTAGGED,
            materials: &[],
            modifiers: &NO_MODIFIERS,
            material_stats: None,
        }
    }

    #[must_use]
    pub fn with_item(mut self, item: &'a ItemProfile) -> Self {
        self.item = item;
        self
    }

    #[must_use]
    pub fn with_materials(mut self, materials: &'a [MaterialId]) -> Self {
        self.materials = materials;
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: &'a ModifierList) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_material_stats(mut self, material_stats: &'a MaterialStatsCache) -> Self {
        self.material_stats = Some(material_stats);
        self
    }

    pub fn item(&self) -> &'a ItemProfile {
        self.item
    }

    /// Materials in part order.
    pub fn materials(&self) -> &'a [MaterialId] {
        self.materials
    }

    pub fn modifiers(&self) -> &'a ModifierList {
        self.modifiers
    }

    /// Level of modifier `id` on this tool, 0 when absent.
    pub fn modifier_level(&self, id: &str) -> u32 {
        self.modifiers.level_of(id)
    }

    pub fn material_stats(&self) -> Option<&'a MaterialStatsCache> {
        self.material_stats
    }
}

impl Default for ToolContext<'_> {
    fn default() -> Self {
        Self::detached()
    }
}
