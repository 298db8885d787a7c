//! Stock content for the forge engine.
//!
//! This crate supplies what a game plugs into `forge-core`:
//! - Behavior hook tokens with their merge strategies ([`hooks`])
//! - Tool stats (durability, damage, speeds, harvest tier) ([`stats`])
//! - Stat and behavior modules ([`modules`])
//! - Serializable module specs and the factory that builds them ([`spec`], [`factory`])
//! - A sample material table and tool catalog ([`catalog`])
//! - TOML config and RON definition file loaders (`loaders`, default feature)

pub mod catalog;
pub mod factory;
pub mod hooks;
pub mod modules;
pub mod spec;
pub mod stats;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{Catalog, MaterialTable, melee_harvest, sample_definitions, sample_modifiers};
pub use factory::{FactoryError, ModuleFactory};
pub use hooks::{Rarity, ToolAction, hook_registry};
pub use spec::{DefinitionSpec, ModifierSpec, ModuleEntrySpec, ModuleSpec};
pub use stats::stat_registry;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, DefinitionFile, DefinitionLoader};
