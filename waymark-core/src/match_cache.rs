//! Per-node memoization of segment matches
//!
//! Choosing a child for a segment is a pure function of the node and the
//! segment text, and nodes never change once a router is assembled, so
//! every decision (including a rejection) can be remembered without ever
//! being invalidated.
//!
//! # Concurrency
//!
//! Lookups take a shared lock; insertions take an exclusive one. Two
//! threads racing on the same segment may both compute the step, and the
//! second insertion simply overwrites the first with an identical value.

use crate::params::Params;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::ops::Add;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default number of segments remembered per node.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Where a successful step leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTarget {
    /// The child at this index.
    Child(usize),
    /// The node itself (segment-spanning converters).
    Itself,
}

/// A remembered step: target plus the parameters it captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedStep {
    pub target: StepTarget,
    pub params: Params,
}

/// Bounded, thread-safe segment cache owned by one route node.
pub struct MatchCache {
    /// `None` values are remembered rejections.
    entries: RwLock<HashMap<String, Option<CachedStep>>>,
    /// Maximum cache size, 0 disables caching
    max_size: usize,
    stats: CacheStats,
}

impl MatchCache {
    /// Create cache with default size (1024 entries).
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Create cache with specific capacity.
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_size,
            stats: CacheStats::default(),
        }
    }

    /// Check if this cache stores anything at all.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.max_size > 0
    }

    /// Maximum number of remembered segments.
    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Look up a segment.
    ///
    /// The outer `Option` is the cache hit, the inner one the remembered
    /// outcome.
    #[inline]
    pub fn get(&self, segment: &str) -> Option<Option<CachedStep>> {
        if !self.is_enabled() {
            return None;
        }

        let result = self.entries.read().get(segment).cloned();

        if result.is_some() {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.stats.misses.fetch_add(1, Ordering::Relaxed);
        }

        result
    }

    /// Remember the outcome for a segment.
    pub fn insert(&self, segment: &str, step: Option<CachedStep>) {
        if !self.is_enabled() {
            return;
        }

        let mut entries = self.entries.write();

        // Simple eviction: if full, clear half
        if entries.len() >= self.max_size && !entries.contains_key(segment) {
            self.stats.evictions.fetch_add(1, Ordering::Relaxed);
            let to_remove: Vec<_> = entries
                .keys()
                .take((self.max_size / 2).max(1))
                .cloned()
                .collect();
            for key in to_remove {
                entries.remove(&key);
            }
        }

        entries.insert(segment.to_string(), step);
        self.stats.insertions.fetch_add(1, Ordering::Relaxed);
    }

    /// Forget every remembered segment.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Get current cache size.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl Default for MatchCache {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Cache counters.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    insertions: AtomicU64,
    evictions: AtomicU64,
}

impl CacheStats {
    /// Take a point-in-time copy of the counters.
    pub fn snapshot(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            insertions: self.insertions.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time cache counters, summable across nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
}

impl CacheStatsSnapshot {
    /// Hit ratio in `[0, 1]`, 0 when nothing was looked up.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl Add for CacheStatsSnapshot {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            hits: self.hits + other.hits,
            misses: self.misses + other.misses,
            insertions: self.insertions + other.insertions,
            evictions: self.evictions + other.evictions,
        }
    }
}
