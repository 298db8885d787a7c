//! Capability tokens and the registry they are declared in.
//!
//! A [`ModuleHook`] names one capability interface `T` (a trait object type
//! such as `dyn ToolStatsHook`). It carries the no-op implementation used when
//! no module requests the hook and an optional merge function that reduces the
//! implementations of many modules into one.
//!
//! # Architecture
//!
//! ```text
//! HookRegistry            ModuleSet
//!   id -> ModuleHook<T>     [(module, requested ids, priority), ...]
//!          \                 /
//!           HookMapBuilder::build
//!                  |
//!               HookMap   id -> merged Arc<T>
//! ```
//!
//! Tokens are registered once at startup; a [`HookMap`] is built once per
//! definition load and is immutable afterwards.

mod map;
pub mod merge;

pub use map::{HookMap, HookMapBuilder};
pub use merge::{AllMerger, MergeSum};

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ErrorSeverity, ForgeError};
use crate::id::HookId;

/// Reduces the ordered implementations of one hook into a single one.
///
/// The list is never empty and is already sorted by `(priority, source order)`.
pub type Merger<T> = fn(Vec<Arc<T>>) -> Arc<T>;

/// Type-erased hook implementation. Always holds an `Arc<T>` for the `T` of
/// the token it was provided for.
pub(crate) type ErasedImpl = Box<dyn Any + Send + Sync>;

/// Identity of a capability interface `T`.
///
/// # Example
///
/// ```
/// # use std::sync::{Arc, LazyLock};
/// # use forge_core::hook::{AllMerger, ModuleHook};
/// pub trait BonusHook: Send + Sync {
///     fn bonus(&self) -> i32 {
///         0
///     }
/// }
///
/// struct NoBonus;
/// impl BonusHook for NoBonus {}
///
/// impl BonusHook for AllMerger<dyn BonusHook> {
///     fn bonus(&self) -> i32 {
///         self.sum_by(0, |hook| hook.bonus())
///     }
/// }
///
/// fn merge_bonus(hooks: Vec<Arc<dyn BonusHook>>) -> Arc<dyn BonusHook> {
///     Arc::new(AllMerger::new(hooks))
/// }
///
/// static BONUS: LazyLock<ModuleHook<dyn BonusHook>> = LazyLock::new(|| {
///     ModuleHook::<dyn BonusHook>::with_merger("example:bonus", Arc::new(NoBonus), merge_bonus)
/// });
///
/// assert_eq!(BONUS.default_instance().bonus(), 0);
/// ```
pub struct ModuleHook<T: ?Sized> {
    id: HookId,
    default: Arc<T>,
    merger: Option<Merger<T>>,
}

impl<T: ?Sized> ModuleHook<T> {
    /// Declares a hook whose first contributor wins when several modules
    /// request it.
    pub fn new(id: impl Into<HookId>, default: Arc<T>) -> Self {
        Self {
            id: id.into(),
            default,
            merger: None,
        }
    }

    /// Declares a hook whose contributors are reduced by `merger`.
    pub fn with_merger(id: impl Into<HookId>, default: Arc<T>, merger: Merger<T>) -> Self {
        Self {
            id: id.into(),
            default,
            merger: Some(merger),
        }
    }

    pub fn id(&self) -> &HookId {
        &self.id
    }

    /// The implementation used when no module requested this hook.
    pub fn default_instance(&self) -> Arc<T> {
        Arc::clone(&self.default)
    }

    /// Returns true if several contributors are merged rather than the first
    /// one winning.
    pub fn has_merger(&self) -> bool {
        self.merger.is_some()
    }

    /// Reduces an ordered list of implementations into one.
    ///
    /// Zero contributors yield the declared default verbatim, a single
    /// contributor is returned as is.
    pub fn merge(&self, mut hooks: Vec<Arc<T>>) -> Arc<T> {
        match hooks.len() {
            0 => self.default_instance(),
            1 => hooks.remove(0),
            _ => match self.merger {
                Some(merger) => merger(hooks),
                None => hooks.remove(0),
            },
        }
    }
}

impl<T: ?Sized> Clone for ModuleHook<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            default: Arc::clone(&self.default),
            merger: self.merger,
        }
    }
}

impl<T: ?Sized> fmt::Debug for ModuleHook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleHook")
            .field("id", &self.id)
            .field("merged", &self.merger.is_some())
            .finish()
    }
}

/// Object-safe view of a [`ModuleHook`] used by the registry and builder.
pub(crate) trait ErasedHook: Send + Sync {
    fn id(&self) -> &HookId;

    /// Returns true if `implementation` was provided for this hook's type.
    fn accepts(&self, implementation: &ErasedImpl) -> bool;

    /// Merges ordered type-erased implementations.
    fn merge_erased(&self, implementations: Vec<ErasedImpl>) -> ErasedImpl;
}

impl<T: ?Sized + Send + Sync + 'static> ErasedHook for ModuleHook<T> {
    fn id(&self) -> &HookId {
        &self.id
    }

    fn accepts(&self, implementation: &ErasedImpl) -> bool {
        (**implementation).is::<Arc<T>>()
    }

    fn merge_erased(&self, implementations: Vec<ErasedImpl>) -> ErasedImpl {
        let hooks: Vec<Arc<T>> = implementations
            .into_iter()
            .filter_map(|implementation| implementation.downcast::<Arc<T>>().ok())
            .map(|boxed| *boxed)
            .collect();
        Box::new(self.merge(hooks))
    }
}

/// Registry of every hook token known to the process.
///
/// Registration happens once at startup; the registry is then shared
/// read-only (typically behind an `Arc`) by every [`HookMapBuilder`].
#[derive(Default)]
pub struct HookRegistry {
    hooks: BTreeMap<HookId, Arc<dyn ErasedHook>>,
}

impl HookRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the stat hooks every definition relies on.
    pub fn with_core_hooks() -> Self {
        let mut registry = Self::new();
        registry.insert(crate::stat::TOOL_STATS.clone());
        registry.insert(crate::stat::MODIFIER_STATS.clone());
        registry
    }

    /// Registers a hook token.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Duplicate`] if a token with the same id exists.
    pub fn register<T>(&mut self, hook: ModuleHook<T>) -> Result<(), HookError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        if self.hooks.contains_key(hook.id().as_str()) {
            return Err(HookError::Duplicate {
                hook: hook.id().clone(),
            });
        }
        self.insert(hook);
        Ok(())
    }

    fn insert<T>(&mut self, hook: ModuleHook<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.hooks.insert(hook.id().clone(), Arc::new(hook));
    }

    /// Returns true if a hook with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.hooks.contains_key(id)
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Arc<dyn ErasedHook>> {
        self.hooks.get(id)
    }

    /// Returns an iterator over registered hook ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &HookId> + '_ {
        self.hooks.keys()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.hooks.keys()).finish()
    }
}

/// Configuration errors raised while registering hooks or building a
/// [`HookMap`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    #[error("hook {hook} is already registered")]
    Duplicate { hook: HookId },

    #[error("module {index} ({module}) requests unknown hook {hook}")]
    UnknownHook {
        index: usize,
        module: String,
        hook: HookId,
    },

    #[error("module {index} ({module}) requests hook {hook} but does not implement it")]
    NotImplemented {
        index: usize,
        module: String,
        hook: HookId,
    },

    #[error("module {index} ({module}) provides hook {hook} with the wrong interface type")]
    TypeMismatch {
        index: usize,
        module: String,
        hook: HookId,
    },

    #[error("module {index} ({module}) requests hook {hook} more than once")]
    DuplicateRequest {
        index: usize,
        module: String,
        hook: HookId,
    },
}

impl HookError {
    /// The hook id the error refers to.
    pub fn hook(&self) -> &HookId {
        match self {
            Self::Duplicate { hook }
            | Self::UnknownHook { hook, .. }
            | Self::NotImplemented { hook, .. }
            | Self::TypeMismatch { hook, .. }
            | Self::DuplicateRequest { hook, .. } => hook,
        }
    }

    /// Index of the offending module within its module set, if any.
    pub fn module_index(&self) -> Option<usize> {
        match self {
            Self::Duplicate { .. } => None,
            Self::UnknownHook { index, .. }
            | Self::NotImplemented { index, .. }
            | Self::TypeMismatch { index, .. }
            | Self::DuplicateRequest { index, .. } => Some(*index),
        }
    }
}

impl ForgeError for HookError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Duplicate { .. } => "HOOK_DUPLICATE",
            Self::UnknownHook { .. } => "HOOK_UNKNOWN",
            Self::NotImplemented { .. } => "HOOK_NOT_IMPLEMENTED",
            Self::TypeMismatch { .. } => "HOOK_TYPE_MISMATCH",
            Self::DuplicateRequest { .. } => "HOOK_DUPLICATE_REQUEST",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeting: Send + Sync {
        fn greet(&self) -> &'static str;
    }

    struct Silent;
    impl Greeting for Silent {
        fn greet(&self) -> &'static str {
            ""
        }
    }

    struct Hello;
    impl Greeting for Hello {
        fn greet(&self) -> &'static str {
            "hello"
        }
    }

    struct Hi;
    impl Greeting for Hi {
        fn greet(&self) -> &'static str {
            "hi"
        }
    }

    fn greeting_hook() -> ModuleHook<dyn Greeting> {
        ModuleHook::<dyn Greeting>::new("test:greeting", Arc::new(Silent))
    }

    #[test]
    fn merge_of_nothing_is_default() {
        let hook = greeting_hook();
        assert_eq!(hook.merge(Vec::new()).greet(), "");
    }

    #[test]
    fn first_contributor_wins_without_merger() {
        let hook = greeting_hook();
        let merged = hook.merge(vec![Arc::new(Hello) as Arc<dyn Greeting>, Arc::new(Hi)]);
        assert_eq!(merged.greet(), "hello");
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = HookRegistry::new();
        registry.register(greeting_hook()).unwrap();
        let err = registry.register(greeting_hook()).unwrap_err();
        assert_eq!(
            err,
            HookError::Duplicate {
                hook: HookId::from_static("test:greeting")
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn core_registry_has_stat_hooks() {
        let mut registry = HookRegistry::with_core_hooks();
        assert!(registry.contains("forge:tool_stats"));
        assert!(registry.contains("forge:modifier_stats"));
        assert_eq!(registry.len(), 2);

        let err = registry
            .register(crate::stat::TOOL_STATS.clone())
            .unwrap_err();
        assert_eq!(err.error_code(), "HOOK_DUPLICATE");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn erased_hook_rejects_foreign_types() {
        let hook = greeting_hook();
        let right: ErasedImpl = Box::new(Arc::new(Hello) as Arc<dyn Greeting>);
        let wrong: ErasedImpl = Box::new(Arc::new(5u32));
        assert!(hook.accepts(&right));
        assert!(!hook.accepts(&wrong));
    }
}
