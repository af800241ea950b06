//! Cache configuration

/// Construction-time settings for a [`StatsCache`](crate::StatsCache)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum resident entries. `None` keeps every entry for the lifetime
    /// of the cache.
    pub max_entries: Option<usize>,
}

impl CacheConfig {
    /// Unbounded cache, no eviction
    pub fn unbounded() -> Self {
        Self { max_entries: None }
    }

    /// Cache holding at most `max_entries`, evicting least recently used
    pub fn bounded(max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries),
        }
    }

    /// Effective bound; a bound of zero counts as no bound
    pub fn limit(&self) -> Option<usize> {
        self.max_entries.filter(|&n| n > 0)
    }
}
