//! Tool definitions: an item profile plus the modules that make it up.

use crate::error::{ErrorSeverity, ForgeError};
use crate::hook::{HookError, HookMap, HookMapBuilder, HookRegistry};
use crate::id::DefinitionId;
use crate::module::ModuleSet;
use crate::predicate::ItemProfile;

/// A loaded tool definition. Its hook map is built eagerly and frozen.
#[derive(Debug)]
pub struct ToolDefinition {
    id: DefinitionId,
    item: ItemProfile,
    modules: ModuleSet,
    hooks: HookMap,
}

impl ToolDefinition {
    /// Builds the definition's hook map.
    ///
    /// # Errors
    ///
    /// Returns the first hook configuration error, tagged with the definition
    /// id.
    pub fn build(
        id: impl Into<DefinitionId>,
        item: ItemProfile,
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
            item,
            modules,
            hooks,
        })
    }

    /// A definition with no modules. Every hook query returns its default.
    pub fn empty(id: impl Into<DefinitionId>) -> Self {
        Self {
            id: id.into(),
            item: ItemProfile::default(),
            modules: ModuleSet::new(),
            hooks: HookMap::empty(),
        }
    }

    pub fn id(&self) -> &DefinitionId {
        &self.id
    }

    pub fn item(&self) -> &ItemProfile {
        &self.item
    }

    pub fn modules(&self) -> &ModuleSet {
        &self.modules
    }

    pub fn hooks(&self) -> &HookMap {
        &self.hooks
    }

    /// Returns true if the definition has no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// A tool or modifier definition that failed to build.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("{owner}: {source}")]
    Hooks { owner: String, source: HookError },
}

impl DefinitionError {
    /// Id of the tool or modifier definition that failed.
    pub fn owner(&self) -> &str {
        match self {
            Self::Hooks { owner, .. } => owner,
        }
    }

    pub fn hook_error(&self) -> &HookError {
        match self {
            Self::Hooks { source, .. } => source,
        }
    }
}

impl ForgeError for DefinitionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Hooks { source, .. } => source.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::HookId;
    use crate::module::{HookProvider, Module, ModuleEntry};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Inert;

    impl Module for Inert {
        fn kind(&self) -> &'static str {
            "inert"
        }

        fn default_hooks(&self) -> Vec<HookId> {
            Vec::new()
        }

        fn provide_hooks(self: Arc<Self>, _hooks: &mut HookProvider) {}
    }

    #[test]
    fn build_error_names_owner_and_hook() {
        let registry = HookRegistry::with_core_hooks();
        let modules = ModuleSet::new().with(ModuleEntry::new(
            Arc::new(Inert),
            vec![HookId::new("forge:tool_stats")],
        ));
        let err = ToolDefinition::build("pickaxe", ItemProfile::new(), modules, &registry)
            .unwrap_err();
        assert_eq!(err.owner(), "pickaxe");
        assert_eq!(err.hook_error().hook().as_str(), "forge:tool_stats");
        assert_eq!(err.error_code(), "HOOK_NOT_IMPLEMENTED");
        assert_eq!(
            err.to_string(),
            "pickaxe: module 0 (inert) requests hook forge:tool_stats but does not implement it"
        );
    }

    #[test]
    fn empty_definition_has_no_hooks() {
        let definition = ToolDefinition::empty("broken");
        assert!(definition.is_empty());
        assert!(definition.hooks().is_empty());
    }
}
