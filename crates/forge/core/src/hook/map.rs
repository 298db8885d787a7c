//! Building and querying the per-definition hook table.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::{ErasedImpl, HookError, HookRegistry, ModuleHook};
use crate::id::HookId;
use crate::module::{HookProvider, ModuleSet};

/// Immutable table mapping hook ids to their merged implementation for one
/// definition.
///
/// A map is never mutated after [`HookMapBuilder::build`]; reflecting a changed
/// module set means building a new map.
#[derive(Default)]
pub struct HookMap {
    hooks: BTreeMap<HookId, ErasedImpl>,
}

impl HookMap {
    /// A map with no requested hooks. Every query returns the token default.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the merged implementation of `hook`, or its default if no
    /// module requested it. Never fails.
    pub fn get<T>(&self, hook: &ModuleHook<T>) -> Arc<T>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.hooks
            .get(hook.id().as_str())
            .and_then(|implementation| (**implementation).downcast_ref::<Arc<T>>())
            .map(Arc::clone)
            .unwrap_or_else(|| hook.default_instance())
    }

    /// Returns true if at least one module requested `hook`.
    pub fn has(&self, hook: &str) -> bool {
        self.hooks.contains_key(hook)
    }

    /// Requested hook ids, sorted.
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

impl fmt::Debug for HookMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.hooks.keys()).finish()
    }
}

/// One module's implementation of a hook, tagged with its sort keys.
struct Contribution {
    priority: i32,
    index: usize,
    implementation: ErasedImpl,
}

/// Builds [`HookMap`]s against a fixed [`HookRegistry`].
///
/// # Algorithm
///
/// 1. Walk module entries in source order
/// 2. For each requested id: the id must be registered and the module must
///    provide an implementation of the right type
/// 3. Append the implementation to the hook's contributor list
/// 4. Stable-sort each list by `(priority, source index)` and merge it
///
/// Cost is O(modules × hooks per module); run it once per definition load.
#[derive(Clone, Copy, Debug)]
pub struct HookMapBuilder<'r> {
    registry: &'r HookRegistry,
}

impl<'r> HookMapBuilder<'r> {
    pub fn new(registry: &'r HookRegistry) -> Self {
        Self { registry }
    }

    /// Builds the hook table for `modules`.
    ///
    /// # Errors
    ///
    /// Fails fast on the first configuration error, naming the module index
    /// and hook id.
    pub fn build(&self, modules: &ModuleSet) -> Result<HookMap, HookError> {
        let mut contributions: BTreeMap<HookId, Vec<Contribution>> = BTreeMap::new();

        for (index, entry) in modules.iter().enumerate() {
            let module = entry.module();
            let mut provider = HookProvider::new();
            Arc::clone(module).provide_hooks(&mut provider);

            for (position, hook_id) in entry.hooks().iter().enumerate() {
                if entry.hooks()[..position].contains(hook_id) {
                    return Err(HookError::DuplicateRequest {
                        index,
                        module: module.kind().to_string(),
                        hook: hook_id.clone(),
                    });
                }

                let hook = self.registry.get(hook_id.as_str()).ok_or_else(|| {
                    HookError::UnknownHook {
                        index,
                        module: module.kind().to_string(),
                        hook: hook_id.clone(),
                    }
                })?;

                let implementation =
                    provider
                        .take(hook_id.as_str())
                        .ok_or_else(|| HookError::NotImplemented {
                            index,
                            module: module.kind().to_string(),
                            hook: hook_id.clone(),
                        })?;

                if !hook.accepts(&implementation) {
                    return Err(HookError::TypeMismatch {
                        index,
                        module: module.kind().to_string(),
                        hook: hook_id.clone(),
                    });
                }

                contributions
                    .entry(hook.id().clone())
                    .or_default()
                    .push(Contribution {
                        priority: entry.priority(),
                        index,
                        implementation,
                    });
            }
        }

        let mut hooks = BTreeMap::new();
        for (id, mut list) in contributions {
            list.sort_by_key(|contribution| (contribution.priority, contribution.index));
            // Registered above, so the lookup cannot miss.
            if let Some(hook) = self.registry.get(id.as_str()) {
                let merged = hook.merge_erased(
                    list.into_iter()
                        .map(|contribution| contribution.implementation)
                        .collect(),
                );
                hooks.insert(id, merged);
            }
        }

        Ok(HookMap { hooks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForgeError;
    use crate::hook::AllMerger;
    use crate::module::{Module, ModuleEntry};
    use std::sync::LazyLock;

    trait Label: Send + Sync {
        fn labels(&self) -> Vec<&'static str> {
            Vec::new()
        }
    }

    trait Bonus: Send + Sync {
        fn bonus(&self) -> i32 {
            0
        }
    }

    struct NoLabel;
    impl Label for NoLabel {}

    struct NoBonus;
    impl Bonus for NoBonus {}

    impl Label for AllMerger<dyn Label> {
        fn labels(&self) -> Vec<&'static str> {
            self.concat(|hook| hook.labels())
        }
    }

    fn merge_labels(hooks: Vec<Arc<dyn Label>>) -> Arc<dyn Label> {
        Arc::new(AllMerger::new(hooks))
    }

    static LABEL: LazyLock<ModuleHook<dyn Label>> = LazyLock::new(|| {
        ModuleHook::<dyn Label>::with_merger("test:label", Arc::new(NoLabel), merge_labels)
    });

    static BONUS: LazyLock<ModuleHook<dyn Bonus>> =
        LazyLock::new(|| ModuleHook::<dyn Bonus>::new("test:bonus", Arc::new(NoBonus)));

    #[derive(Debug)]
    struct Tagged {
        label: &'static str,
        priority: i32,
    }

    impl Label for Tagged {
        fn labels(&self) -> Vec<&'static str> {
            vec![self.label]
        }
    }

    impl Module for Tagged {
        fn kind(&self) -> &'static str {
            "tagged"
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn default_hooks(&self) -> Vec<HookId> {
            vec![LABEL.id().clone()]
        }

        fn provide_hooks(self: Arc<Self>, hooks: &mut HookProvider) {
            hooks.provide(&LABEL, self as Arc<dyn Label>);
        }
    }

    fn registry() -> HookRegistry {
        let mut registry = HookRegistry::new();
        registry.register(LABEL.clone()).unwrap();
        registry.register(BONUS.clone()).unwrap();
        registry
    }

    fn tagged(label: &'static str, priority: i32) -> Arc<dyn Module> {
        Arc::new(Tagged { label, priority })
    }

    #[test]
    fn unrequested_hook_returns_default() {
        let registry = registry();
        let set = ModuleSet::new().with_module(tagged("a", 0));
        let map = HookMapBuilder::new(&registry).build(&set).unwrap();
        assert!(!map.has("test:bonus"));
        assert_eq!(map.get(&BONUS).bonus(), 0);
    }

    #[test]
    fn contributions_merge_in_priority_then_source_order() {
        let registry = registry();
        let set = ModuleSet::new()
            .with_module(tagged("late", 50))
            .with_module(tagged("first", 0))
            .with_module(tagged("second", 0));
        let map = HookMapBuilder::new(&registry).build(&set).unwrap();
        assert_eq!(map.get(&LABEL).labels(), vec!["first", "second", "late"]);
    }

    #[test]
    fn entry_priority_overrides_module_priority() {
        let registry = registry();
        let set = ModuleSet::new()
            .with_module(tagged("a", 0))
            .with(ModuleEntry::with_default_hooks(tagged("b", 0)).with_priority(-5));
        let map = HookMapBuilder::new(&registry).build(&set).unwrap();
        assert_eq!(map.get(&LABEL).labels(), vec!["b", "a"]);
    }

    #[test]
    fn unknown_hook_is_rejected_with_module_index() {
        let registry = registry();
        let set = ModuleSet::new().with_module(tagged("a", 0)).with(ModuleEntry::new(
            tagged("b", 0),
            vec![HookId::new("test:missing")],
        ));
        let err = HookMapBuilder::new(&registry).build(&set).unwrap_err();
        assert_eq!(
            err,
            HookError::UnknownHook {
                index: 1,
                module: "tagged".to_string(),
                hook: HookId::new("test:missing"),
            }
        );
    }

    #[test]
    fn requesting_unimplemented_hook_is_rejected() {
        let registry = registry();
        let set = ModuleSet::new().with(ModuleEntry::new(
            tagged("a", 0),
            vec![BONUS.id().clone()],
        ));
        let err = HookMapBuilder::new(&registry).build(&set).unwrap_err();
        assert!(matches!(err, HookError::NotImplemented { index: 0, .. }));
        assert_eq!(err.module_index(), Some(0));
    }

    #[test]
    fn duplicate_request_is_rejected() {
        let registry = registry();
        let set = ModuleSet::new().with(ModuleEntry::new(
            tagged("a", 0),
            vec![LABEL.id().clone(), LABEL.id().clone()],
        ));
        let err = HookMapBuilder::new(&registry).build(&set).unwrap_err();
        assert!(matches!(err, HookError::DuplicateRequest { .. }));
    }

    /// Offers a `Bonus` under the label hook's id.
    #[derive(Debug)]
    struct Impostor;

    impl Bonus for Impostor {}

    static MISLABELED: LazyLock<ModuleHook<dyn Bonus>> =
        LazyLock::new(|| ModuleHook::<dyn Bonus>::new("test:label", Arc::new(NoBonus)));

    impl Module for Impostor {
        fn kind(&self) -> &'static str {
            "impostor"
        }

        fn default_hooks(&self) -> Vec<HookId> {
            vec![LABEL.id().clone()]
        }

        fn provide_hooks(self: Arc<Self>, hooks: &mut HookProvider) {
            hooks.provide(&MISLABELED, self as Arc<dyn Bonus>);
        }
    }

    #[test]
    fn wrong_interface_type_is_rejected() {
        let registry = registry();
        let set = ModuleSet::new()
            .with_module(tagged("a", 0))
            .with_module(Arc::new(Impostor));
        let err = HookMapBuilder::new(&registry).build(&set).unwrap_err();
        assert_eq!(
            err,
            HookError::TypeMismatch {
                index: 1,
                module: "impostor".to_string(),
                hook: HookId::from_static("test:label"),
            }
        );
        assert_eq!(err.error_code(), "HOOK_TYPE_MISMATCH");
        assert_eq!(err.module_index(), Some(1));
    }

    #[test]
    fn empty_module_set_builds_empty_map() {
        let registry = registry();
        let map = HookMapBuilder::new(&registry)
            .build(&ModuleSet::new())
            .unwrap();
        assert!(map.is_empty());
        assert!(map.get(&LABEL).labels().is_empty());
    }
}
