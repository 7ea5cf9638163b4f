//! LRU cache of computed partitionings.
//!
//! Entries are keyed by partitioning id and a hash of the text, so an
//! identical text partitioned twice (reopened file, undo back to a known
//! state) skips the scan. Eviction drops the entry with the oldest access
//! stamp once `capacity` is reached.

use std::{hash::BuildHasher, sync::Arc};

use fluentmark_config::PartitioningConfig;
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::partition::{Partitioner, PartitioningId, TypedRegion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    partitioning: PartitioningId,
    length: usize,
    hash: u64,
}

impl CacheKey {
    fn new(partitioning: PartitioningId, text: &str) -> Self {
        Self {
            partitioning,
            length: text.len(),
            hash: FxBuildHasher.hash_one(text),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    regions: Arc<[TypedRegion]>,
    access_count: u64,
}

/// Fixed-capacity LRU of region lists. Not synchronized; wrap it in a
/// `Mutex` to share it.
#[derive(Debug)]
pub struct PartitionCache {
    map: FxHashMap<CacheKey, CacheEntry>,
    capacity: usize,
    access_counter: u64,
}

impl PartitionCache {
    /// # Panics
    /// Panics if `capacity` is 0.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be greater than 0");
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            capacity,
            access_counter: 0,
        }
    }

    /// A cache sized by `cache_capacity`; a capacity of 0 is treated as 1.
    pub fn from_config(config: &PartitioningConfig) -> Self {
        Self::new(config.cache_capacity.max(1))
    }

    /// Regions previously stored for `text` under `partitioning`, marking
    /// the entry as recently used.
    pub fn get(&mut self, partitioning: PartitioningId, text: &str) -> Option<Arc<[TypedRegion]>> {
        self.access_counter += 1;
        let key = CacheKey::new(partitioning, text);
        match self.map.get_mut(&key) {
            Some(entry) => {
                entry.access_count = self.access_counter;
                log::debug!("partition cache hit for {partitioning} ({} bytes)", text.len());
                Some(Arc::clone(&entry.regions))
            }
            None => {
                log::debug!("partition cache miss for {partitioning} ({} bytes)", text.len());
                None
            }
        }
    }

    /// Stores `regions` for `text`, evicting the least recently used entry
    /// when full.
    pub fn insert(
        &mut self,
        partitioning: PartitioningId,
        text: &str,
        regions: impl Into<Arc<[TypedRegion]>>,
    ) -> Arc<[TypedRegion]> {
        self.access_counter += 1;
        let key = CacheKey::new(partitioning, text);

        if self.map.len() >= self.capacity
            && !self.map.contains_key(&key)
            && let Some(lru_key) = self
                .map
                .iter()
                .min_by_key(|(_, entry)| entry.access_count)
                .map(|(key, _)| *key)
        {
            self.map.remove(&lru_key);
            log::trace!("partition cache evicted an entry for {}", lru_key.partitioning);
        }

        let regions = regions.into();
        self.map.insert(
            key,
            CacheEntry {
                regions: Arc::clone(&regions),
                access_count: self.access_counter,
            },
        );
        regions
    }

    /// Cached regions for `text`, partitioning and storing them on a miss.
    pub fn get_or_compute(&mut self, partitioner: &Partitioner, text: &str) -> Arc<[TypedRegion]> {
        let id = partitioner.partitioning_id();
        match self.get(id, text) {
            Some(regions) => regions,
            None => self.insert(id, text, partitioner.partition_text(text)),
        }
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.access_counter = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
