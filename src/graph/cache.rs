//! TTL cache for interest search results.
//!
//! Graph search quotas are per-app and interest vocabularies barely change,
//! so identical queries within the TTL are served from memory. Entries are
//! evicted lazily on access and on insert pressure.

use dashmap::DashMap;
use std::time::{Duration, Instant};

use super::types::Interest;
use crate::config::cache::CacheConfig;

struct CachedSearch {
    interests: Vec<Interest>,
    fetched_at: Instant,
}

/// Concurrent TTL cache keyed by normalized search parameters.
pub struct SearchCache {
    entries: DashMap<String, CachedSearch>,
    ttl: Duration,
    max_entries: usize,
    enabled: bool,
}

impl SearchCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::from_secs(config.ttl_seconds),
            max_entries: config.max_entries,
            enabled: config.enabled,
        }
    }

    /// Cache key for a search. Queries are trimmed and lowercased so "Yoga"
    /// and " yoga " share an entry; kind and limit stay distinct.
    pub fn key(kind: &str, query: &str, limit: u32) -> String {
        format!("{}:{}:{}", kind, query.trim().to_lowercase(), limit)
    }

    pub fn get(&self, key: &str) -> Option<Vec<Interest>> {
        if !self.enabled {
            return None;
        }

        let expired = match self.entries.get(key) {
            Some(entry) => {
                if entry.fetched_at.elapsed() < self.ttl {
                    return Some(entry.interests.clone());
                }
                true
            }
            None => false,
        };

        // The read guard is released above; removing under it would deadlock.
        if expired {
            self.entries.remove(key);
        }
        None
    }

    pub fn insert(&self, key: String, interests: Vec<Interest>) {
        if !self.enabled {
            return;
        }
        if self.entries.len() >= self.max_entries {
            self.evict_expired();
        }
        if self.entries.len() >= self.max_entries {
            // Still full of live entries: drop the new one instead of growing.
            return;
        }
        self.entries.insert(
            key,
            CachedSearch {
                interests,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Remove all expired entries. Returns the number removed.
    pub fn sweep(&self) -> usize {
        let before = self.entries.len();
        self.evict_expired();
        before.saturating_sub(self.entries.len())
    }

    fn evict_expired(&self) {
        self.entries.retain(|_, entry| entry.fetched_at.elapsed() < self.ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
