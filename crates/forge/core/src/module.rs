//! Modules and the ordered module sets definitions are made of.
//!
//! A [`Module`] states explicitly which hooks it implements by handing typed
//! implementations to a [`HookProvider`]; nothing is discovered by runtime
//! type inspection. A [`ModuleEntry`] then says which of those hooks the
//! owning definition actually wants, so one module type can serve several
//! roles depending on configuration.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::hook::{ErasedImpl, ModuleHook};
use crate::id::HookId;
use crate::modifier::priority;

/// A unit of composable behavior or data contributing to a definition.
///
/// Modules are shared read-only across definitions, so every method takes
/// `&self` (or an owned `Arc<Self>` when the module hands itself out as a
/// hook implementation).
pub trait Module: fmt::Debug + Send + Sync {
    /// Stable name of the module type, used in diagnostics.
    fn kind(&self) -> &'static str;

    /// Ordering key within a hook's contributor list. Lower values run first.
    fn priority(&self) -> i32 {
        priority::DEFAULT
    }

    /// Hooks this module is requested for when the definition does not list
    /// hooks explicitly.
    fn default_hooks(&self) -> Vec<HookId>;

    /// Hands every hook implementation this module offers to `hooks`.
    fn provide_hooks(self: Arc<Self>, hooks: &mut HookProvider);
}

/// Collects the typed hook implementations a module offers.
#[derive(Default)]
pub struct HookProvider {
    provided: HashMap<HookId, ErasedImpl>,
}

impl HookProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers `implementation` for `hook`. A later offer for the same hook
    /// replaces the earlier one.
    pub fn provide<T>(&mut self, hook: &ModuleHook<T>, implementation: Arc<T>) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.provided
            .insert(hook.id().clone(), Box::new(implementation));
        self
    }

    pub(crate) fn take(&mut self, hook: &str) -> Option<ErasedImpl> {
        self.provided.remove(hook)
    }
}

impl fmt::Debug for HookProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.provided.keys()).finish()
    }
}

/// A module plus the hooks a definition requests from it.
#[derive(Clone, Debug)]
pub struct ModuleEntry {
    module: Arc<dyn Module>,
    hooks: Vec<HookId>,
    priority: i32,
}

impl ModuleEntry {
    /// Requests `hooks` from `module`, using the module's own priority.
    pub fn new(module: Arc<dyn Module>, hooks: Vec<HookId>) -> Self {
        let priority = module.priority();
        Self {
            module,
            hooks,
            priority,
        }
    }

    /// Requests the module's default hooks.
    pub fn with_default_hooks(module: Arc<dyn Module>) -> Self {
        let hooks = module.default_hooks();
        Self::new(module, hooks)
    }

    /// Overrides the entry priority (builder pattern).
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn module(&self) -> &Arc<dyn Module> {
        &self.module
    }

    /// Requested hook ids, in declaration order.
    pub fn hooks(&self) -> &[HookId] {
        &self.hooks
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }
}

/// Ordered list of module entries owned by one definition.
#[derive(Clone, Debug, Default)]
pub struct ModuleSet {
    entries: Vec<ModuleEntry>,
}

impl ModuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry (builder pattern).
    #[must_use]
    pub fn with(mut self, entry: ModuleEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Appends a module requesting its default hooks (builder pattern).
    #[must_use]
    pub fn with_module(self, module: Arc<dyn Module>) -> Self {
        self.with(ModuleEntry::with_default_hooks(module))
    }

    pub fn push(&mut self, entry: ModuleEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ModuleEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ModuleEntry> for ModuleSet {
    fn from_iter<I: IntoIterator<Item = ModuleEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
