//! Keyed cache for fetched collections
//!
//! Every list screen reads through this cache. A key is the collection
//! tag plus the canonical serialization of the request parameters, so
//! the same filter combination hits the cache and any change to it
//! misses. Mutations never patch cached entries; they invalidate the
//! whole collection tag and let the next read refetch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::debug;

/// Cache tag for one remote collection.
///
/// The people screens all share [`Collection::Users`]: the server keeps
/// one `/user` collection and the screens differ only by the `role`
/// parameter, so a user mutation must drop every role's cached page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Listings,
    PricingPlans,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Listings => "listings",
            Collection::PricingPlans => "pricing-plans",
        }
    }
}

/// Full cache key: collection tag + canonical parameter string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub collection: Collection,
    pub params: String,
}

impl QueryKey {
    pub fn new(collection: Collection, params: impl Into<String>) -> Self {
        Self {
            collection,
            params: params.into(),
        }
    }

    /// Key for a whole-collection read with no parameters
    pub fn bare(collection: Collection) -> Self {
        Self::new(collection, "")
    }
}

struct CacheEntry {
    value: Value,
    fetched_at: Instant,
}

/// In-memory query cache with a freshness window
pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    ttl: Duration,
}

impl QueryCache {
    /// Five minutes keeps list screens snappy without letting an admin
    /// stare at very old data.
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(300))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Return the cached value if it is still fresh
    pub fn get(&self, key: &QueryKey) -> Option<&Value> {
        self.entries
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| &entry.value)
    }

    pub fn insert(&mut self, key: QueryKey, value: Value) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Drop every cached entry for one collection, whatever its
    /// parameters. Called after any successful mutation against it.
    pub fn invalidate(&mut self, collection: Collection) {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.collection != collection);
        debug!(
            collection = collection.as_str(),
            dropped = before - self.entries.len(),
            "Invalidated cached queries"
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn users_key(params: &str) -> QueryKey {
        QueryKey::new(Collection::Users, params)
    }

    #[test]
    fn repeated_reads_of_the_same_key_hit_the_cache() {
        let mut cache = QueryCache::new();
        let key = users_key(r#"{"role":"Breeder"}"#);

        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), json!([{"id": 1}]));

        let mut fetches = 0;
        for _ in 0..3 {
            if cache.get(&key).is_none() {
                fetches += 1;
                cache.insert(key.clone(), json!([{"id": 1}]));
            }
        }
        assert_eq!(fetches, 0);
    }

    #[test]
    fn different_parameters_are_different_keys() {
        let mut cache = QueryCache::new();
        cache.insert(users_key(r#"{"role":"Breeder"}"#), json!([1]));

        assert!(cache.get(&users_key(r#"{"role":"Vendor"}"#)).is_none());
        assert!(cache
            .get(&users_key(r#"{"role":"Breeder","search":"rosie"}"#))
            .is_none());
    }

    #[test]
    fn invalidation_drops_every_key_of_the_collection() {
        let mut cache = QueryCache::new();
        cache.insert(users_key(r#"{"role":"Breeder"}"#), json!([1]));
        cache.insert(users_key(r#"{"role":"Vendor"}"#), json!([2]));
        cache.insert(QueryKey::bare(Collection::Listings), json!([3]));

        cache.invalidate(Collection::Users);

        assert!(cache.get(&users_key(r#"{"role":"Breeder"}"#)).is_none());
        assert!(cache.get(&users_key(r#"{"role":"Vendor"}"#)).is_none());
        assert!(cache.get(&QueryKey::bare(Collection::Listings)).is_some());
    }

    #[test]
    fn next_read_after_invalidation_refetches_exactly_once() {
        let mut cache = QueryCache::new();
        let key = users_key(r#"{"role":"User"}"#);
        cache.insert(key.clone(), json!([{"id": 1}]));

        cache.invalidate(Collection::Users);

        let mut fetches = 0;
        for _ in 0..3 {
            if cache.get(&key).is_none() {
                fetches += 1;
                cache.insert(key.clone(), json!([{"id": 1}, {"id": 2}]));
            }
        }
        assert_eq!(fetches, 1);
    }

    #[test]
    fn stale_entries_are_misses() {
        let mut cache = QueryCache::with_ttl(Duration::from_millis(0));
        let key = users_key("");
        cache.insert(key.clone(), json!([]));
        std::thread::sleep(Duration::from_millis(2));
        assert!(cache.get(&key).is_none());
    }
}
