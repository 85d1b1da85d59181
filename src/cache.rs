use crate::config::EngineConfig;
use crate::normalize::{Catalog, SnapshotId};
use crate::options::{FilterOptions, compute_filter_options};
use crate::search::SearchIndex;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Per-snapshot artifacts that are only rebuilt when the snapshot changes.
#[derive(Debug)]
pub struct Prepared {
    pub snapshot: SnapshotId,
    pub options: FilterOptions,
    pub index: SearchIndex,
}

impl Prepared {
    pub fn build(catalog: &Catalog, config: &EngineConfig) -> Self {
        Self {
            snapshot: catalog.id(),
            options: compute_filter_options(catalog.records(), &config.type_priority),
            index: SearchIndex::build(catalog.records(), &config.search),
        }
    }
}

/// Least-recently-used cache of prepared snapshots.
#[derive(Debug)]
pub struct PreparedCache {
    config: EngineConfig,
    entries: LruCache<SnapshotId, Arc<Prepared>>,
}

impl PreparedCache {
    pub fn new(config: EngineConfig) -> Self {
        let capacity = NonZeroUsize::new(config.cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            config,
            entries: LruCache::new(capacity),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Membership check that leaves recency untouched.
    pub fn contains(&self, snapshot: SnapshotId) -> bool {
        self.entries.contains(&snapshot)
    }

    pub fn get_or_prepare(&mut self, catalog: &Catalog) -> Arc<Prepared> {
        if let Some(hit) = self.entries.get(&catalog.id()) {
            log::debug!("prepared cache hit for {:?}", catalog.id());
            return Arc::clone(hit);
        }

        log::debug!("prepared cache miss for {:?}; building", catalog.id());
        let prepared = Arc::new(Prepared::build(catalog, &self.config));
        if let Some((evicted, _)) = self.entries.push(catalog.id(), Arc::clone(&prepared)) {
            log::debug!("evicting prepared snapshot {evicted:?}");
        }
        prepared
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
