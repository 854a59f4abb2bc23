//! Bounded memoization cache for entity extraction
//!
//! Keyed by the raw input string (byte-for-byte, not normalized) so an
//! identical text never triggers re-extraction. LRU eviction bounds memory
//! across long-lived processes.

use crate::entities::model::ExtractionDetails;
use cached::{Cached, SizedCache};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cache hit/miss counters and current size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that required extraction
    pub misses: u64,
    /// Entries currently held
    pub entries: usize,
}

/// Bounded LRU cache of extraction results
pub struct ExtractionCache {
    inner: Mutex<SizedCache<String, ExtractionDetails>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ExtractionCache {
    /// Create a cache holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(SizedCache::with_size(capacity.max(1))),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a previously extracted result
    pub fn get(&self, text: &str) -> Option<ExtractionDetails> {
        let mut cache = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match cache.cache_get(text) {
            Some(details) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(details.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store an extraction result
    pub fn insert(&self, text: String, details: ExtractionDetails) {
        let mut cache = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let _ = cache.cache_set(text, details);
    }

    /// Drop all entries (counters are kept)
    pub fn clear(&self) {
        let mut cache = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        cache.cache_clear();
    }

    /// Current hit/miss counters and entry count
    pub fn stats(&self) -> CacheStats {
        let cache = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: cache.cache_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let cache = ExtractionCache::new(8);
        assert!(cache.get("query").is_none());

        cache.insert("query".to_string(), ExtractionDetails::default());
        assert_eq!(cache.get("query"), Some(ExtractionDetails::default()));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_lru_eviction_respects_capacity() {
        let cache = ExtractionCache::new(2);
        cache.insert("a".to_string(), ExtractionDetails::default());
        cache.insert("b".to_string(), ExtractionDetails::default());
        cache.insert("c".to_string(), ExtractionDetails::default());

        assert_eq!(cache.stats().entries, 2);
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn test_clear() {
        let cache = ExtractionCache::new(8);
        cache.insert("a".to_string(), ExtractionDetails::default());
        cache.clear();
        assert_eq!(cache.stats().entries, 0);
    }
}
