//! StatsCache: content-addressed store for computed statistics

use std::collections::HashMap;
use ahash::RandomState;
use parking_lot::RwLock;
use statstore::{fingerprint, normalize, Fingerprint, Result, ResultBundle, Sample};
use tracing::{debug, trace, warn};

use crate::config::CacheConfig;
use crate::lru::{Insert, LruCache};
use crate::stats::CacheStats;

/// Backing map, chosen once from the config
enum Entries {
    Unbounded(HashMap<Fingerprint, ResultBundle, RandomState>),
    Bounded(LruCache<Fingerprint, ResultBundle>),
}

/// What happened to a store attempt
enum Stored {
    Inserted { evicted: Option<Fingerprint> },
    Present,
}

impl Entries {
    fn insert_if_absent(&mut self, key: Fingerprint, bundle: ResultBundle) -> Stored {
        match self {
            Entries::Unbounded(map) => {
                if map.contains_key(&key) {
                    Stored::Present
                } else {
                    map.insert(key, bundle);
                    Stored::Inserted { evicted: None }
                }
            }
            Entries::Bounded(lru) => match lru.insert_if_absent(key, bundle) {
                Insert::Inserted(evicted) => Stored::Inserted { evicted },
                Insert::Present => Stored::Present,
            },
        }
    }

    /// Lookup that updates recency in the bounded case
    fn get(&mut self, key: &Fingerprint) -> Option<&ResultBundle> {
        match self {
            Entries::Unbounded(map) => map.get(key),
            Entries::Bounded(lru) => lru.get(key),
        }
    }

    fn peek(&self, key: &Fingerprint) -> Option<&ResultBundle> {
        match self {
            Entries::Unbounded(map) => map.get(key),
            Entries::Bounded(lru) => lru.peek(key),
        }
    }

    fn contains(&self, key: &Fingerprint) -> bool {
        match self {
            Entries::Unbounded(map) => map.contains_key(key),
            Entries::Bounded(lru) => lru.contains(key),
        }
    }

    fn len(&self) -> usize {
        match self {
            Entries::Unbounded(map) => map.len(),
            Entries::Bounded(lru) => lru.len(),
        }
    }

    fn clear(&mut self) {
        match self {
            Entries::Unbounded(map) => map.clear(),
            Entries::Bounded(lru) => lru.clear(),
        }
    }
}

/// In-memory cache mapping a dataset fingerprint to its statistics.
///
/// The first bundle stored under a fingerprint is kept; later stores for an
/// equivalent dataset return the same fingerprint and change nothing. The
/// check and the insert happen under one write lock, so this holds when the
/// cache is shared between threads (wrap it in an `Arc`).
pub struct StatsCache {
    entries: RwLock<Entries>,
    stats: CacheStats,
    config: CacheConfig,
}

impl Default for StatsCache {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsCache {
    /// Create an empty, unbounded cache
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create an empty cache with the given configuration
    ///
    /// # Arguments
    /// * `config` - Bound on resident entries; a bound of zero is ignored
    pub fn with_config(config: CacheConfig) -> Self {
        if config.max_entries == Some(0) {
            warn!("max_entries of 0 ignored, cache is unbounded");
        }

        let entries = match config.limit() {
            Some(limit) => Entries::Bounded(LruCache::new(limit)),
            None => Entries::Unbounded(HashMap::with_hasher(RandomState::new())),
        };

        Self {
            entries: RwLock::new(entries),
            stats: CacheStats::new(),
            config,
        }
    }

    /// Store statistics for a dataset unless an equivalent dataset is already
    /// cached.
    ///
    /// # Arguments
    /// * `data` - Dataset the statistics were computed from, in any order
    /// * `bundle` - Statistics to keep
    ///
    /// # Returns
    /// * `Fingerprint` - Key of the resident entry, new or pre-existing
    pub fn store<T: Sample>(&self, data: &[T], bundle: ResultBundle) -> Fingerprint {
        let key = fingerprint(data);
        self.store_by_key(key.clone(), bundle);
        key
    }

    fn store_by_key(&self, key: Fingerprint, bundle: ResultBundle) {
        let outcome = {
            let mut entries = self.entries.write();
            entries.insert_if_absent(key.clone(), bundle)
        };

        match outcome {
            Stored::Inserted { evicted } => {
                self.stats.record_insert();
                debug!(fingerprint = %key, "stored statistics");
                if let Some(old) = evicted {
                    self.stats.record_eviction();
                    debug!(fingerprint = %old, "evicted statistics");
                }
            }
            Stored::Present => {
                self.stats.record_duplicate();
                debug!(fingerprint = %key, "statistics already cached, keeping first");
            }
        }
    }

    /// Look up statistics by fingerprint.
    ///
    /// # Returns
    /// * `Some(ResultBundle)` - Copy of the stored bundle
    /// * `None` - Nothing stored under `key`; not an error
    pub fn retrieve(&self, key: &Fingerprint) -> Option<ResultBundle> {
        let found = if self.is_bounded() {
            self.entries.write().get(key).cloned()
        } else {
            self.entries.read().peek(key).cloned()
        };

        match found {
            Some(_) => {
                self.stats.record_hit();
                trace!(fingerprint = %key, "cache hit");
            }
            None => {
                self.stats.record_miss();
                trace!(fingerprint = %key, "cache miss");
            }
        }

        found
    }

    /// Fingerprint a dataset and look up its statistics
    pub fn retrieve_dataset<T: Sample>(&self, data: &[T]) -> Option<ResultBundle> {
        self.retrieve(&fingerprint(data))
    }

    /// Return cached statistics for `data`, computing and storing them on a
    /// miss.
    ///
    /// `compute` receives the normalized values and runs only on a miss. If it
    /// fails, the error is returned and nothing is stored. If another caller
    /// stores the same dataset first, that caller's bundle is returned.
    pub fn get_or_compute<T, F>(
        &self,
        data: &[T],
        compute: F,
    ) -> Result<(Fingerprint, ResultBundle)>
    where
        T: Sample,
        F: FnOnce(&[f64]) -> Result<ResultBundle>,
    {
        let key = fingerprint(data);
        if let Some(bundle) = self.retrieve(&key) {
            return Ok((key, bundle));
        }

        let computed = compute(&normalize(data))?;
        self.store_by_key(key.clone(), computed.clone());

        // Read back the resident bundle; a concurrent store may have won
        let resident = self.entries.read().peek(&key).cloned();
        Ok((key, resident.unwrap_or(computed)))
    }

    /// Check whether a fingerprint is resident (no counters, no recency)
    pub fn contains(&self, key: &Fingerprint) -> bool {
        self.entries.read().contains(key)
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get the configuration the cache was built with
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Get the number of resident entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry and reset statistics
    pub fn clear(&self) {
        self.entries.write().clear();
        self.stats.reset();
        debug!("cache cleared");
    }

    fn is_bounded(&self) -> bool {
        self.config.limit().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statstore::{describe, sample_mean};

    fn mean_bundle(mean: f64) -> ResultBundle {
        ResultBundle::new().with("mean", mean)
    }

    #[test]
    fn test_store_and_retrieve() {
        let cache = StatsCache::new();
        let data = [3, 1, 2];
        let bundle = mean_bundle(sample_mean(&data).unwrap());

        let key = cache.store(&data, bundle.clone());

        assert_eq!(key, fingerprint(&data));
        assert_eq!(cache.retrieve(&key), Some(bundle));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().inserts(), 1);
        assert_eq!(cache.stats().hits(), 1);
    }

    #[test]
    fn test_first_writer_wins() {
        let cache = StatsCache::new();

        let first = cache.store(&[1, 2, 3], mean_bundle(2.0));
        let second = cache.store(&[3, 2, 1], mean_bundle(99.0));

        assert_eq!(first, second);
        assert_eq!(cache.retrieve(&first), Some(mean_bundle(2.0)));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().inserts(), 1);
        assert_eq!(cache.stats().duplicates(), 1);
    }

    #[test]
    fn test_int_and_float_share_entry() {
        let cache = StatsCache::new();

        let a = cache.store(&[1, 2, 3], mean_bundle(2.0));
        let b = cache.store(&[1.0, 2.0, 3.0], mean_bundle(0.0));

        assert_eq!(a, b);
        assert_eq!(
            cache.retrieve_dataset(&[2.0f32, 3.0, 1.0]),
            Some(mean_bundle(2.0))
        );
    }

    #[test]
    fn test_retrieve_unknown() {
        let cache = StatsCache::new();

        assert_eq!(cache.retrieve(&fingerprint(&[42])), None);
        assert_eq!(
            cache.retrieve(&fingerprint(&[42])).unwrap_or_default(),
            ResultBundle::new()
        );
        assert_eq!(cache.stats().misses(), 2);
        assert_eq!(cache.stats().hit_ratio(), 0.0);
    }

    #[test]
    fn test_empty_dataset() {
        let cache = StatsCache::new();

        let key = cache.store::<f64>(&[], ResultBundle::new().with("count", 0.0));
        assert_eq!(key, fingerprint::<i32>(&[]));
        assert!(cache.contains(&key));
    }

    #[test]
    fn test_get_or_compute() {
        let cache = StatsCache::new();
        let mut calls = 0;

        let (key, bundle) = cache
            .get_or_compute(&[4, 2, 6], |v| {
                calls += 1;
                describe(v)
            })
            .unwrap();
        assert_eq!(bundle.get("mean"), Some(4.0));
        assert_eq!(calls, 1);

        let (again, cached) = cache
            .get_or_compute(&[6, 4, 2], |_| panic!("should be cached"))
            .unwrap();
        assert_eq!(again, key);
        assert_eq!(cached, bundle);
        assert_eq!(cache.stats().hits(), 1);
        assert_eq!(cache.stats().misses(), 1);
    }

    #[test]
    fn test_get_or_compute_error_not_stored() {
        let cache = StatsCache::new();

        let result = cache.get_or_compute::<f64, _>(&[], |v| describe(v));
        assert!(matches!(result, Err(statstore::Error::InvalidArgument(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_or_compute_keeps_existing() {
        let cache = StatsCache::new();
        cache.store(&[1, 2], mean_bundle(1.5));

        let (_, bundle) = cache
            .get_or_compute(&[2, 1], |_| Ok(mean_bundle(0.0)))
            .unwrap();
        assert_eq!(bundle, mean_bundle(1.5));
    }

    #[test]
    fn test_large_integer_datasets_kept_apart() {
        let cache = StatsCache::new();

        let a = cache.store(&[9_007_199_254_740_992i64], mean_bundle(1.0));
        let b = cache.store(&[9_007_199_254_740_993i64], mean_bundle(2.0));

        assert_ne!(a, b);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.retrieve(&b), Some(mean_bundle(2.0)));
        assert_eq!(cache.stats().duplicates(), 0);
    }

    #[test]
    fn test_bounded_eviction() {
        let cache = StatsCache::with_config(CacheConfig::bounded(2));

        let k0 = cache.store(&[0], mean_bundle(0.0));
        let k1 = cache.store(&[1], mean_bundle(1.0));

        // Touch k0 so k1 becomes least recently used
        cache.retrieve(&k0);
        let k2 = cache.store(&[2], mean_bundle(2.0));

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&k0));
        assert!(!cache.contains(&k1));
        assert!(cache.contains(&k2));
        assert_eq!(cache.stats().evictions(), 1);

        // An evicted dataset can be stored afresh
        cache.store(&[1], mean_bundle(10.0));
        assert_eq!(cache.retrieve(&k1), Some(mean_bundle(10.0)));
    }

    #[test]
    fn test_zero_bound_is_unbounded() {
        let cache = StatsCache::with_config(CacheConfig::bounded(0));

        for i in 0..10 {
            cache.store(&[i], mean_bundle(i as f64));
        }
        assert_eq!(cache.len(), 10);
        assert_eq!(cache.stats().evictions(), 0);
    }

    #[test]
    fn test_clear() {
        let cache = StatsCache::new();

        let key = cache.store(&[1, 2], mean_bundle(1.5));
        cache.retrieve(&key);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.retrieve(&key), None);
        assert_eq!(cache.stats().hits(), 0);
        assert_eq!(cache.stats().inserts(), 0);
    }
}
