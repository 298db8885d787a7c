//! Runtime side of the forge: live definitions, reloads and cached stats.
//!
//! The core crates are pure; this crate owns the mutable state around them.
//! Consumers hold a [`StatsService`] and call [`StatsService::reload`] whenever
//! definition data changes.
//!
//! Modules are organized by responsibility:
//! - [`registry`] builds definition snapshots and swaps them on reload
//! - [`service`] resolves item stats through a generation-tagged cache
//! - [`source`] is the input a reload reads from
//! - [`config`] and [`error`] hold the runtime configuration and error types
pub mod config;
pub mod error;
pub mod registry;
pub mod service;
pub mod source;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use registry::{DefinitionRegistry, DefinitionSnapshot};
pub use service::{ItemState, StatsService};
pub use source::DefinitionSource;
