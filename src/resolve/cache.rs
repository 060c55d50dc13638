//! Ranked-result caching
//!
//! Shields the upstream candidate fetch from repeated identical queries.
//! Keys are the caller's raw text, case-folded: differently-cased repeats of
//! the same message hit one entry, while differently-typo'd queries that
//! normalize identically stay separate on purpose, since normalization is
//! cheap next to the fetch it is shielding.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

use crate::error::Result;
use crate::types::Candidate;

/// Configuration for the result cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Time-to-live for cache entries, in seconds
    pub ttl_seconds: u64,
    /// Maximum number of entries; the oldest is evicted at capacity
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 3600, // 1 hour
            max_entries: 1000,
        }
    }
}

/// A cached ranked result set
#[derive(Debug)]
struct CacheEntry {
    results: Vec<Candidate>,
    created_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Cache statistics
#[derive(Debug, Default)]
struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

/// Point-in-time view of cache activity
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStatsSnapshot {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub hit_rate: f64,
}

/// TTL cache over resolved ranked results.
///
/// Expiry is checked at read time only; there is no background eviction.
/// An expired entry reads as a miss and is overwritten by the next insert.
pub struct ResolveCache {
    entries: DashMap<String, CacheEntry>,
    config: CacheConfig,
    stats: CacheStats,
}

impl Default for ResolveCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolveCache {
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config,
            stats: CacheStats::default(),
        }
    }

    /// Case-insensitive key over the caller's exact text
    fn cache_key(raw_query: &str) -> String {
        raw_query.trim().to_lowercase()
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(self.config.ttl_seconds)
    }

    /// Cached results for a raw query, or a miss. Removes the entry when it
    /// has outlived the TTL.
    pub fn get(&self, raw_query: &str) -> Option<Vec<Candidate>> {
        let key = Self::cache_key(raw_query);

        if let Some(entry) = self.entries.get(&key) {
            if !entry.is_expired(self.ttl()) {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.results.clone());
            }
            drop(entry);
            self.entries.remove(&key);
        }

        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store ranked results for a raw query
    pub fn insert(&self, raw_query: &str, results: Vec<Candidate>) {
        if self.entries.len() >= self.config.max_entries {
            self.evict_oldest();
        }
        self.entries.insert(
            Self::cache_key(raw_query),
            CacheEntry {
                results,
                created_at: Instant::now(),
            },
        );
    }

    /// Check the cache, fall back to `fetch_and_rank` on a miss, store the
    /// outcome, return it.
    ///
    /// Under serialized access a key reaches upstream at most once per TTL
    /// window; empty result sets are cached like any other so a no-match
    /// query does not hammer the source either. Errors are not cached.
    pub fn resolve<F>(&self, raw_query: &str, fetch_and_rank: F) -> Result<Vec<Candidate>>
    where
        F: FnOnce() -> Result<Vec<Candidate>>,
    {
        if let Some(results) = self.get(raw_query) {
            debug!(query = %raw_query, "cache hit");
            return Ok(results);
        }

        let results = fetch_and_rank()?;
        self.insert(raw_query, results.clone());
        Ok(results)
    }

    /// Evict the oldest entry
    fn evict_oldest(&self) {
        let mut oldest_key: Option<String> = None;
        let mut oldest_time = Instant::now();

        for entry in self.entries.iter() {
            if entry.created_at < oldest_time {
                oldest_time = entry.created_at;
                oldest_key = Some(entry.key().clone());
            }
        }

        if let Some(key) = oldest_key {
            self.entries.remove(&key);
            self.stats.evictions.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Remove every entry past its TTL
    pub fn remove_expired(&self) {
        let ttl = self.ttl();
        self.entries.retain(|_, entry| !entry.is_expired(ttl));
    }

    /// Drop all entries
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStatsSnapshot {
        let hits = self.stats.hits.load(Ordering::Relaxed);
        let misses = self.stats.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        CacheStatsSnapshot {
            entries: self.entries.len(),
            hits,
            misses,
            evictions: self.stats.evictions.load(Ordering::Relaxed),
            hit_rate: if total == 0 {
                0.0
            } else {
                hits as f64 / total as f64
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(titles: &[&str]) -> Vec<Candidate> {
        titles.iter().copied().map(Candidate::new).collect()
    }

    fn expiring_cache() -> ResolveCache {
        ResolveCache::with_config(CacheConfig {
            ttl_seconds: 0,
            ..Default::default()
        })
    }

    #[test]
    fn test_insert_then_get() {
        let cache = ResolveCache::new();
        cache.insert("Mario", results(&["Super Mario"]));

        let cached = cache.get("Mario").unwrap();
        assert_eq!(cached[0].title, "Super Mario");
    }

    #[test]
    fn test_key_is_case_insensitive() {
        let cache = ResolveCache::new();
        cache.insert("Mario", results(&["Super Mario"]));
        assert!(cache.get("mario").is_some());
        assert!(cache.get("  MARIO  ").is_some());
        assert!(cache.get("marios").is_none());
    }

    #[test]
    fn test_resolve_fetches_once_within_ttl() {
        let cache = ResolveCache::new();
        let mut calls = 0;

        let first = cache
            .resolve("Mario", || {
                calls += 1;
                Ok(results(&["Super Mario"]))
            })
            .unwrap();
        let second = cache
            .resolve("mario", || {
                calls += 1;
                Ok(results(&["should not run"]))
            })
            .unwrap();

        assert_eq!(calls, 1);
        assert_eq!(first[0].title, second[0].title);
    }

    #[test]
    fn test_expired_entry_is_a_miss_and_refetches() {
        let cache = expiring_cache();
        let mut calls = 0;
        let mut fetch = || {
            calls += 1;
            Ok(results(&["Super Mario"]))
        };

        cache.resolve("Mario", &mut fetch).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        cache.resolve("Mario", &mut fetch).unwrap();
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = ResolveCache::new();
        let err = cache.resolve("Mario", || {
            Err(crate::error::ResolveError::Upstream("down".into()))
        });
        assert!(err.is_err());

        let mut calls = 0;
        cache
            .resolve("Mario", || {
                calls += 1;
                Ok(results(&["Super Mario"]))
            })
            .unwrap();
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_empty_results_are_cached() {
        let cache = ResolveCache::new();
        let mut calls = 0;
        for _ in 0..2 {
            cache
                .resolve("unknown game", || {
                    calls += 1;
                    Ok(Vec::new())
                })
                .unwrap();
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let cache = ResolveCache::with_config(CacheConfig {
            ttl_seconds: 3600,
            max_entries: 2,
        });
        cache.insert("first", results(&["a"]));
        std::thread::sleep(Duration::from_millis(5));
        cache.insert("second", results(&["b"]));
        std::thread::sleep(Duration::from_millis(5));
        cache.insert("third", results(&["c"]));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("first").is_none());
        assert!(cache.get("second").is_some());
        assert!(cache.get("third").is_some());
    }

    #[test]
    fn test_stats() {
        let cache = ResolveCache::new();
        cache.get("missing");
        cache.insert("Mario", results(&["Super Mario"]));
        cache.get("Mario");
        cache.get("Mario");

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
        assert!(stats.hit_rate > 0.6);
    }
}
