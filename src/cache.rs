//! # Preference Spec Cache
//!
//! Bounded LRU cache from raw Accept header text to its parsed
//! [`PreferenceSpec`]. Clients tend to send a handful of identical headers, so
//! re-parsing them on every request is wasted work.
//!
//! ## Behavior
//!
//! - **Hit**: the stored spec is returned and moved to the front of the LRU.
//! - **Miss**: the header is parsed *outside* the lock. A successful parse is
//!   stored (evicting the least recently used entry at capacity); a failed
//!   parse stores nothing and the error is returned.
//! - **Races**: two threads missing on the same key may both parse and both
//!   store. The last store wins; both results are identical.
//!
//! The cache never changes negotiation results, only latency. A capacity of
//! zero (or `REPRESENT_SPEC_CACHE=off`) turns it into a pass-through.

use crate::accept::{self, PreferenceSpec};
use crate::error::ParseError;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Default number of distinct headers kept.
pub const DEFAULT_SPEC_CACHE_CAPACITY: usize = 256;

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to parse
    pub misses: u64,
    /// Entries dropped to make room
    pub evictions: u64,
    /// Entries currently held
    pub size: usize,
    /// Maximum entries (0 when disabled)
    pub capacity: usize,
}

impl CacheStats {
    /// Hit rate as a percentage of all lookups.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Thread-safe LRU of parsed preference headers.
pub struct SpecCache {
    // LruCache::get() reorders entries, so even lookups need exclusive access.
    entries: Option<Mutex<Entries>>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl SpecCache {
    /// Create a cache holding up to `capacity` headers. Zero disables caching.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// A cache that never stores anything.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(0)
    }

    /// Return the parsed spec for `raw`, parsing and caching it on a miss.
    pub fn get_or_parse(&self, raw: &str) -> Result<Arc<PreferenceSpec>, ParseError> {
        let Some(entries) = &self.entries else {
            return accept::parse(raw).map(Arc::new);
        };

        if let Some(spec) = lock(entries).get(raw) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(header = raw, "accept spec cache hit");
            return Ok(Arc::clone(spec));
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let spec = Arc::new(accept::parse(raw)?);

        let mut guard = lock(entries);
        // put() returns the old value on update, not on eviction, so
        // detect evictions up front.
        let will_evict = guard.peek(raw).is_none() && guard.len() >= guard.cap().get();
        guard.put(Arc::from(raw), Arc::clone(&spec));
        if will_evict {
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
        trace!(
            header = raw,
            cache_size = guard.len(),
            evicted = will_evict,
            "accept spec cached"
        );
        Ok(spec)
    }

    /// Drop every cached entry. Counters are kept.
    pub fn clear(&self) {
        if let Some(entries) = &self.entries {
            lock(entries).clear();
        }
    }

    /// Number of cached headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .as_ref()
            .map_or(0, |entries| lock(entries).len())
    }

    /// True when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the hit/miss/eviction counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let capacity = self
            .entries
            .as_ref()
            .map_or(0, |entries| lock(entries).cap().get());
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            size: self.len(),
            capacity,
        }
    }
}

type Entries = LruCache<Arc<str>, Arc<PreferenceSpec>>;

/// `get`/`put` never leave the LRU half-updated, so a guard poisoned by a
/// panicking holder is still safe to use.
fn lock(entries: &Mutex<Entries>) -> MutexGuard<'_, Entries> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for SpecCache {
    fn default() -> Self {
        Self::new(DEFAULT_SPEC_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_returns_same_spec() {
        let cache = SpecCache::new(4);
        let first = cache.get_or_parse("application/json").unwrap();
        let second = cache.get_or_parse("application/json").unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert_eq!(stats.capacity, 4);
        assert_eq!(stats.hit_rate(), 50.0);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = SpecCache::new(4);
        assert!(cache.get_or_parse("text/html;q=2").is_err());
        assert!(cache.get_or_parse("text/html;q=2").is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_least_recently_used_is_evicted() {
        let cache = SpecCache::new(2);
        let a = cache.get_or_parse("a/a").unwrap();
        cache.get_or_parse("b/b").unwrap();
        // touch a so b becomes the eviction candidate
        cache.get_or_parse("a/a").unwrap();
        cache.get_or_parse("c/c").unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
        assert!(Arc::ptr_eq(&a, &cache.get_or_parse("a/a").unwrap()));

        let misses_before = cache.stats().misses;
        cache.get_or_parse("b/b").unwrap();
        assert_eq!(cache.stats().misses, misses_before + 1);
    }

    #[test]
    fn test_disabled_cache_always_parses() {
        let cache = SpecCache::disabled();
        let first = cache.get_or_parse("text/plain").unwrap();
        let second = cache.get_or_parse("text/plain").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_cache_survives_poisoned_lock() {
        let cache = Arc::new(SpecCache::new(4));
        cache.get_or_parse("text/plain").unwrap();

        let poisoner = Arc::clone(&cache);
        let joined = std::thread::spawn(move || {
            let _guard = poisoner.entries.as_ref().unwrap().lock().unwrap();
            panic!("poison the cache lock");
        })
        .join();
        assert!(joined.is_err());
        assert!(cache.entries.as_ref().unwrap().is_poisoned());

        // still served from, and stored into, the cache
        cache.get_or_parse("text/plain").unwrap();
        cache.get_or_parse("application/json").unwrap();
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.size, 2);
    }

    #[test]
    fn test_clear_empties_cache() {
        let cache = SpecCache::default();
        cache.get_or_parse("text/plain").unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().capacity, DEFAULT_SPEC_CACHE_CAPACITY);
    }
}
