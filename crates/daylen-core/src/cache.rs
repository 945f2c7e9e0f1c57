//! LRU cache for computed day lengths.
//!
//! The isoline search revisits the same (date, latitude) pairs constantly:
//! every bisection starts from the same two domain endpoints and the sweep
//! over target day lengths retraces the same midpoints. The cache is an
//! explicit object handed to the model rather than hidden global state, and
//! it sits behind a mutex so one model can serve several threads.
//!
//! Entries are keyed by twilight as well as date and latitude, so models
//! with different twilight definitions may share one cache.

use chrono::NaiveDate;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::ephemeris::Twilight;

/// Default number of cached entries.
pub const DEFAULT_CACHE_CAPACITY: usize = 2048;

/// Cache key: the date, the twilight and the exact bit pattern of the
/// latitude.
pub type DayLengthKey = (NaiveDate, Twilight, u64);

/// Build the cache key for a (date, twilight, latitude) triple.
pub fn cache_key(date: NaiveDate, twilight: Twilight, latitude: f64) -> DayLengthKey {
    (date, twilight, latitude.to_bits())
}

/// Bounded LRU cache of day lengths in hours.
pub struct DayLengthCache {
    cache: Mutex<LruCache<DayLengthKey, f64>>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub evictions: u64,
}

impl CacheStats {
    /// Hit rate as a percentage (0-100).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl DayLengthCache {
    /// Create a cache holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<DayLengthKey, f64>> {
        // Entries are plain floats, a panic mid-insert cannot corrupt them.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a day length, marking it most recently used.
    pub fn get(&self, date: NaiveDate, twilight: Twilight, latitude: f64) -> Option<f64> {
        let found = self.lock().get(&cache_key(date, twilight, latitude)).copied();
        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    /// Insert a day length, evicting the least recently used entry when full.
    pub fn insert(&self, date: NaiveDate, twilight: Twilight, latitude: f64, day_length: f64) {
        let key = cache_key(date, twilight, latitude);
        if let Some((displaced, _)) = self.lock().push(key, day_length) {
            if displaced != key {
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Check for an entry without touching LRU order or counters.
    pub fn contains(&self, date: NaiveDate, twilight: Twilight, latitude: f64) -> bool {
        self.lock().contains(&cache_key(date, twilight, latitude))
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Default for DayLengthCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
