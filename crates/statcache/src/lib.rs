//! # statcache
//!
//! Content-addressed memoization for computed statistics.
//!
//! ## Architecture
//! - **Key**: SHA-256 fingerprint of the sorted dataset (see `statstore`)
//! - **Store**: AHash map behind a `parking_lot` lock, first writer wins
//! - **Bound**: optional LRU eviction, off by default
//!
//! ```
//! use statcache::StatsCache;
//! use statstore::{sample_mean, ResultBundle};
//!
//! let cache = StatsCache::new();
//! let data = [3, 1, 2];
//! let bundle = ResultBundle::new().with("mean", sample_mean(&data).unwrap());
//!
//! let key = cache.store(&data, bundle.clone());
//! assert_eq!(cache.retrieve(&key), Some(bundle));
//! assert_eq!(cache.store(&[2, 1, 3], ResultBundle::new()), key);
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod lru;
mod stats;

pub use cache::StatsCache;
pub use config::CacheConfig;
pub use stats::CacheStats;
pub use statstore::{Error, Fingerprint, Result, ResultBundle};
