use std::fmt;
use std::sync::Arc;

use super::{MaterialStats, MaterialStatsSource};
use crate::cache::ReloadCache;
use crate::id::{MaterialId, MaterialStatsId};

/// Memoized `(material, stat type) -> stats` lookups over a source.
///
/// Missing combinations are cached as the source's defaults for the stat type.
pub struct MaterialStatsCache {
    source: Arc<dyn MaterialStatsSource>,
    entries: ReloadCache<(MaterialId, MaterialStatsId), Arc<MaterialStats>>,
}

impl MaterialStatsCache {
    pub fn new(source: Arc<dyn MaterialStatsSource>) -> Self {
        Self {
            source,
            entries: ReloadCache::new(),
        }
    }

    pub fn get(&self, material: &MaterialId, stat_type: &MaterialStatsId) -> Arc<MaterialStats> {
        self.entries
            .get_or_insert_with((material.clone(), stat_type.clone()), || {
                Arc::new(
                    self.source
                        .stats(material, stat_type)
                        .unwrap_or_else(|| self.source.default_stats(stat_type)),
                )
            })
    }

    /// Forgets every lookup, returning the new generation.
    pub fn clear(&self) -> u64 {
        self.entries.clear()
    }

    pub fn generation(&self) -> u64 {
        self.entries.generation()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for MaterialStatsCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterialStatsCache")
            .field("generation", &self.entries.generation())
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        lookups: AtomicUsize,
    }

    impl MaterialStatsSource for Counting {
        fn stats(&self, material: &MaterialId, _stat_type: &MaterialStatsId) -> Option<MaterialStats> {
            self.lookups.fetch_add(1, Ordering::Relaxed);
            (material.as_str() == "iron").then(|| MaterialStats::new().with("durability", 250.0))
        }

        fn default_stats(&self, _stat_type: &MaterialStatsId) -> MaterialStats {
            MaterialStats::new().with("durability", 1.0)
        }
    }

    #[test]
    fn lookups_are_memoized_with_defaults() {
        let source = Arc::new(Counting::default());
        let cache = MaterialStatsCache::new(source.clone());
        let head = MaterialStatsId::new("head");

        assert_eq!(cache.get(&MaterialId::new("iron"), &head).get("durability"), Some(250.0));
        assert_eq!(cache.get(&MaterialId::new("iron"), &head).get("durability"), Some(250.0));
        assert_eq!(cache.get(&MaterialId::new("paper"), &head).get("durability"), Some(1.0));
        assert_eq!(source.lookups.load(Ordering::Relaxed), 2);

        assert_eq!(cache.clear(), 1);
        cache.get(&MaterialId::new("iron"), &head);
        assert_eq!(source.lookups.load(Ordering::Relaxed), 3);
    }
}
