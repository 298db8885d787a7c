//! Definition registry with copy-on-reload snapshots.
//!
//! A reload builds a complete [`DefinitionSnapshot`] off to the side and then
//! swaps it in under a short write lock. Readers clone the current `Arc` and
//! keep working against it, so they never observe a half-built registry.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use forge_core::{
    DefinitionId, ForgeError, HookRegistry, Modifier, ModifierId, ModifierLookup,
    ModifierRegistry, ToolDefinition,
};
use tracing::{debug, error, info, warn};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::source::DefinitionSource;

/// Every live definition and modifier of one reload.
#[derive(Debug, Default)]
pub struct DefinitionSnapshot {
    generation: u64,
    definitions: BTreeMap<DefinitionId, Arc<ToolDefinition>>,
    modifiers: ModifierRegistry,
    fallbacks: Vec<DefinitionId>,
    skipped_modifiers: Vec<ModifierId>,
}

impl DefinitionSnapshot {
    /// Reload counter. The snapshot a registry starts with is generation 0.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn definition(&self, id: &str) -> Option<&Arc<ToolDefinition>> {
        self.definitions.get(id)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &Arc<ToolDefinition>> + '_ {
        self.definitions.values()
    }

    pub fn modifiers(&self) -> &ModifierRegistry {
        &self.modifiers
    }

    /// Definitions replaced by an empty one because they failed to build.
    pub fn fallbacks(&self) -> &[DefinitionId] {
        &self.fallbacks
    }

    /// Modifiers left out because they failed to build.
    pub fn skipped_modifiers(&self) -> &[ModifierId] {
        &self.skipped_modifiers
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ModifierLookup for DefinitionSnapshot {
    fn modifier(&self, id: &str) -> Option<Arc<Modifier>> {
        self.modifiers.modifier(id)
    }
}

/// Owns the current [`DefinitionSnapshot`] and rebuilds it on reload.
#[derive(Debug)]
pub struct DefinitionRegistry {
    hooks: HookRegistry,
    config: RuntimeConfig,
    current: RwLock<Arc<DefinitionSnapshot>>,
}

impl DefinitionRegistry {
    /// Creates a registry with an empty generation-0 snapshot.
    pub fn new(hooks: HookRegistry, config: RuntimeConfig) -> Self {
        Self {
            hooks,
            config,
            current: RwLock::new(Arc::new(DefinitionSnapshot::default())),
        }
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The snapshot current at the time of the call.
    pub fn snapshot(&self) -> Arc<DefinitionSnapshot> {
        // The lock only guards an `Arc` swap; a poisoned guard still holds a
        // complete snapshot.
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn generation(&self) -> u64 {
        self.snapshot().generation()
    }

    /// Rebuilds every definition and modifier from `source` and swaps the
    /// result in.
    ///
    /// Definitions that fail to build are logged and replaced by an empty
    /// definition; failing modifiers are logged and left out. With
    /// `strict_definitions` set, the first failure aborts the reload and the
    /// current snapshot stays in place.
    pub fn reload(&self, source: &dyn DefinitionSource) -> Result<Arc<DefinitionSnapshot>> {
        let mut snapshot = self.build(source)?;

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        snapshot.generation = current.generation + 1;
        let snapshot = Arc::new(snapshot);
        *current = Arc::clone(&snapshot);
        drop(current);

        info!(
            target: "forge::definitions",
            generation = snapshot.generation,
            definitions = snapshot.definitions.len(),
            modifiers = snapshot.modifiers.len(),
            fallbacks = snapshot.fallbacks.len(),
            skipped_modifiers = snapshot.skipped_modifiers.len(),
            "Definitions reloaded"
        );

        Ok(snapshot)
    }

    fn build(&self, source: &dyn DefinitionSource) -> Result<DefinitionSnapshot> {
        let strict = self.config.forge.strict_definitions;
        let factory = source.factory();
        let mut snapshot = DefinitionSnapshot::default();

        for spec in source.definitions() {
            let definition = match factory.definition(&spec, &self.hooks) {
                Ok(definition) => definition,
                Err(source) if strict => {
                    return Err(RuntimeError::Definition {
                        id: spec.id,
                        source,
                    });
                }
                Err(err) => {
                    error!(
                        target: "forge::definitions",
                        definition = %spec.id,
                        module = ?err.module_index(),
                        code = err.error_code(),
                        severity = err.severity().as_str(),
                        error = %err,
                        "Definition failed to build, using an empty definition"
                    );
                    snapshot.fallbacks.push(spec.id.clone());
                    ToolDefinition::empty(spec.id.clone())
                }
            };

            if self.config.trace_definitions {
                debug!(
                    target: "forge::definitions",
                    definition = %definition.id(),
                    modules = definition.modules().len(),
                    hooks = definition.hooks().len(),
                    "Definition built"
                );
            }

            if let Some(previous) = snapshot
                .definitions
                .insert(definition.id().clone(), Arc::new(definition))
            {
                warn!(
                    target: "forge::definitions",
                    definition = %previous.id(),
                    "Duplicate definition id, the later one wins"
                );
            }
        }

        for spec in source.modifiers() {
            match factory.modifier(&spec, &self.hooks) {
                Ok(modifier) => {
                    if let Some(previous) = snapshot.modifiers.insert(modifier) {
                        warn!(
                            target: "forge::definitions",
                            modifier = %previous.id(),
                            "Duplicate modifier id, the later one wins"
                        );
                    }
                }
                Err(source) if strict => {
                    return Err(RuntimeError::Modifier {
                        id: spec.id,
                        source,
                    });
                }
                Err(err) => {
                    error!(
                        target: "forge::definitions",
                        modifier = %spec.id,
                        module = ?err.module_index(),
                        code = err.error_code(),
                        severity = err.severity().as_str(),
                        error = %err,
                        "Modifier failed to build, leaving it out"
                    );
                    snapshot.skipped_modifiers.push(spec.id);
                }
            }
        }

        Ok(snapshot)
    }
}
