//! Common error infrastructure for forge-core.
//!
//! Domain-specific errors (`HookError`, `StatError`, `MaterialError`,
//! `DefinitionError`) live beside the code that raises them. This module holds
//! the shared classification every one of them reports through [`ForgeError`].
//!
//! # Design Principles
//!
//! - **Fail at load**: configuration errors surface while a definition is
//!   built, never while gameplay code queries a finished [`crate::HookMap`]
//! - **Rich Context**: errors carry module index, hook id or stat id so the
//!   data author can find the offending entry
//! - **Severity Classification**: callers pick a recovery strategy per class

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Configuration**: bad definition data; the definition is rejected and the
///   caller substitutes an empty definition
/// - **Resolution**: inconsistent persisted item data met during a stat pass;
///   the contribution is skipped
/// - **Internal**: a broken invariant inside the engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid definition data, reported to the data author.
    ///
    /// Examples: unknown hook id, module requesting a hook it does not
    /// implement, stat type outside a provider's contract
    Configuration,

    /// Transient mismatch in persisted item data.
    ///
    /// Examples: stat type list and material list lengths differ
    Resolution,

    /// Unexpected state inconsistency; should be investigated.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Resolution => "resolution",
            Self::Internal => "internal",
        }
    }
}

/// Common trait for all forge-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by how the caller recovers, not by impact
pub trait ForgeError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_labels() {
        assert_eq!(ErrorSeverity::Configuration.as_str(), "configuration");
        assert_eq!(ErrorSeverity::Resolution.as_str(), "resolution");
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }
}
