//! Where a reload reads its definitions from.

use forge_content::{Catalog, DefinitionSpec, ModifierSpec, ModuleFactory};

/// Definition data for one reload.
///
/// Implementations hand out fresh specs on every call; the registry never
/// keeps a source around between reloads.
pub trait DefinitionSource {
    fn definitions(&self) -> Vec<DefinitionSpec>;

    fn modifiers(&self) -> Vec<ModifierSpec>;

    /// Factory knowing every material stat provider the specs refer to.
    fn factory(&self) -> ModuleFactory;
}

impl DefinitionSource for Catalog {
    fn definitions(&self) -> Vec<DefinitionSpec> {
        self.definitions.clone()
    }

    fn modifiers(&self) -> Vec<ModifierSpec> {
        self.modifiers.clone()
    }

    fn factory(&self) -> ModuleFactory {
        Catalog::factory(self)
    }
}
