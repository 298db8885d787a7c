//! Turns specs into modules, definitions and modifiers.

use std::collections::BTreeMap;
use std::sync::Arc;

use forge_core::{
    DefinitionError, ErrorSeverity, ForgeError, HookRegistry, MaterialError,
    MaterialStatProvider, Modifier, Module, ModuleEntry, ModuleSet, ToolDefinition,
};

use crate::modules::{
    InteractionModule, MaterialStatsModule, RarityModule, SetStatsModule, SlotsModule,
    StatBoostModule, ToolActionModule, TooltipModule,
};
use crate::spec::{DefinitionSpec, ModifierSpec, ModuleEntrySpec, ModuleSpec};
use crate::stats::{float_stat, tier_stat};

/// Builds live modules from [`ModuleSpec`]s.
///
/// Stats are looked up among the stock stats; material providers must be
/// registered up front.
#[derive(Debug, Default)]
pub struct ModuleFactory {
    providers: BTreeMap<String, Arc<MaterialStatProvider>>,
}

impl ModuleFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a material stat provider under its name (builder pattern).
    #[must_use]
    pub fn with_provider(mut self, provider: MaterialStatProvider) -> Self {
        self.add_provider(provider);
        self
    }

    pub fn add_provider(&mut self, provider: MaterialStatProvider) {
        self.providers
            .insert(provider.name().to_string(), Arc::new(provider));
    }

    pub fn provider(&self, name: &str) -> Option<&Arc<MaterialStatProvider>> {
        self.providers.get(name)
    }

    /// Builds the module described by `spec`.
    ///
    /// # Errors
    ///
    /// Unknown stat or provider names, or a part list the provider rejects.
    /// `index` is reported in the error.
    pub fn module(&self, index: usize, spec: &ModuleSpec) -> Result<Arc<dyn Module>, FactoryError> {
        let module: Arc<dyn Module> = match spec {
            ModuleSpec::SetStats { stats, tiers } => {
                let mut module = SetStatsModule::new();
                for (id, value) in stats {
                    let stat = float_stat(id).ok_or_else(|| FactoryError::UnknownStat {
                        index,
                        stat: id.clone(),
                    })?;
                    module = module.with_float(stat.clone(), *value);
                }
                for (id, tier) in tiers {
                    let stat = tier_stat(id).ok_or_else(|| FactoryError::UnknownStat {
                        index,
                        stat: id.clone(),
                    })?;
                    module = module.with_tier(stat.clone(), *tier);
                }
                Arc::new(module)
            }
            ModuleSpec::StatBoost {
                stat,
                operation,
                value,
                condition,
            } => {
                let stat = float_stat(stat).ok_or_else(|| FactoryError::UnknownStat {
                    index,
                    stat: stat.clone(),
                })?;
                Arc::new(
                    StatBoostModule::new(stat.clone(), *operation, *value).when(condition.clone()),
                )
            }
            ModuleSpec::MaterialStats { provider, parts } => {
                let resolved =
                    self.provider(provider)
                        .ok_or_else(|| FactoryError::UnknownProvider {
                            index,
                            provider: provider.clone(),
                        })?;
                let module = MaterialStatsModule::new(Arc::clone(resolved), parts.clone())
                    .map_err(|source| FactoryError::Material { index, source })?;
                Arc::new(module)
            }
            ModuleSpec::Tooltip { lines } => Arc::new(TooltipModule::new(lines.iter().cloned())),
            ModuleSpec::ToolAction { actions } => {
                Arc::new(ToolActionModule::new(actions.iter().copied()))
            }
            ModuleSpec::Interaction { target, message } => {
                Arc::new(InteractionModule::new(target.clone(), message.clone()))
            }
            ModuleSpec::Slots { slots } => Arc::new(SlotsModule::new(*slots)),
            ModuleSpec::Rarity { rarity } => Arc::new(RarityModule::new(*rarity)),
        };
        Ok(module)
    }

    /// Builds an entry, applying hook and priority overrides.
    ///
    /// # Errors
    ///
    /// See [`module`](Self::module).
    pub fn entry(&self, index: usize, spec: &ModuleEntrySpec) -> Result<ModuleEntry, FactoryError> {
        let module = self.module(index, &spec.module)?;
        let entry = match &spec.hooks {
            Some(hooks) => ModuleEntry::new(module, hooks.clone()),
            None => ModuleEntry::with_default_hooks(module),
        };
        Ok(match spec.priority {
            Some(priority) => entry.with_priority(priority),
            None => entry,
        })
    }

    /// Builds a module set in spec order.
    ///
    /// # Errors
    ///
    /// The first failing entry.
    pub fn module_set(&self, specs: &[ModuleEntrySpec]) -> Result<ModuleSet, FactoryError> {
        specs
            .iter()
            .enumerate()
            .map(|(index, spec)| self.entry(index, spec))
            .collect()
    }

    /// Builds a tool definition and its hook map.
    ///
    /// # Errors
    ///
    /// Module construction errors, then hook map errors.
    pub fn definition(
        &self,
        spec: &DefinitionSpec,
        registry: &HookRegistry,
    ) -> Result<ToolDefinition, FactoryError> {
        let modules = self
            .module_set(&spec.modules)
            .map_err(|err| err.within(spec.id.as_str()))?;
        Ok(ToolDefinition::build(
            spec.id.clone(),
            spec.item.clone(),
            modules,
            registry,
        )?)
    }

    /// Builds a modifier and its hook map.
    ///
    /// # Errors
    ///
    /// Module construction errors, then hook map errors.
    pub fn modifier(
        &self,
        spec: &ModifierSpec,
        registry: &HookRegistry,
    ) -> Result<Modifier, FactoryError> {
        let modules = self
            .module_set(&spec.modules)
            .map_err(|err| err.within(spec.id.as_str()))?;
        Ok(Modifier::build(
            spec.id.clone(),
            spec.priority,
            modules,
            registry,
        )?)
    }
}

/// A spec that could not be turned into a live definition.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FactoryError {
    #[error("module {index}: unknown stat {stat}")]
    UnknownStat { index: usize, stat: String },

    #[error("module {index}: unknown material stat provider {provider}")]
    UnknownProvider { index: usize, provider: String },

    #[error("module {index}: {source}")]
    Material { index: usize, source: MaterialError },

    #[error("{owner}: {source}")]
    Module {
        owner: String,
        source: Box<FactoryError>,
    },

    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

impl FactoryError {
    fn within(self, owner: &str) -> Self {
        Self::Module {
            owner: owner.to_string(),
            source: Box::new(self),
        }
    }

    /// Index of the offending module, if the error names one.
    pub fn module_index(&self) -> Option<usize> {
        match self {
            Self::UnknownStat { index, .. }
            | Self::UnknownProvider { index, .. }
            | Self::Material { index, .. } => Some(*index),
            Self::Module { source, .. } => source.module_index(),
            Self::Definition(err) => err.hook_error().module_index(),
        }
    }
}

impl ForgeError for FactoryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownStat { .. } => "FACTORY_UNKNOWN_STAT",
            Self::UnknownProvider { .. } => "FACTORY_UNKNOWN_PROVIDER",
            Self::Material { source, .. } => source.error_code(),
            Self::Module { source, .. } => source.error_code(),
            Self::Definition(err) => err.error_code(),
        }
    }
}
