//! Time-bounded in-memory memoization of acquisition results.
//!
//! Entries are keyed by the immutable request parameters and expire after a
//! fixed TTL. Nothing survives the process; there is no global instance, the
//! owner (normally [`MarketSdk`](crate::MarketSdk)) holds the cache.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::error::Result;

/// Request parameters identifying one cached corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Trend {
        keywords: Vec<String>,
        start: NaiveDate,
        end: NaiveDate,
    },
    Shopping {
        keyword: String,
        count: usize,
    },
    Blog {
        keyword: String,
    },
}

struct Entry<V> {
    value: V,
    stored_at: Instant,
    ttl: Duration,
}

impl<V> Entry<V> {
    fn is_fresh(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) < self.ttl
    }
}

/// Memoizes producer results per [`CacheKey`] for a caller-supplied TTL.
///
/// The producer runs outside the map lock and its value is published in one
/// insert, so readers see either the previous entry or the complete new one.
/// Concurrent misses on the same key are serialized on a per-key slot: the
/// first caller produces, the rest wait and then read its entry. Failed
/// producers are never cached, so a waiter behind a failure produces itself.
pub struct ResultCache<V> {
    entries: Mutex<HashMap<CacheKey, Entry<V>>>,
    in_flight: Mutex<HashMap<CacheKey, Arc<Mutex<()>>>>,
}

impl<V: Clone> Default for ResultCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> ResultCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Entry<V>>> {
        // A panic inside a producer never holds this lock, so a poisoned map
        // is still consistent.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn slot(&self, key: &CacheKey) -> Arc<Mutex<()>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(in_flight.entry(key.clone()).or_default())
    }

    /// Forget the slot for `key` once no other caller still holds it.
    fn release(&self, key: &CacheKey, slot: &Arc<Mutex<()>>) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        let idle = in_flight
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && Arc::strong_count(slot) <= 2);
        if idle {
            in_flight.remove(key);
        }
    }

    /// Return the fresh cached value for `key`, or run `producer`, cache its
    /// value for `ttl`, and return it.
    pub fn get_or_compute<F>(&self, key: &CacheKey, ttl: Duration, producer: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Some(value) = self.get(key) {
            tracing::debug!(?key, "cache hit");
            return Ok(value);
        }

        let slot = self.slot(key);
        let result = {
            // The slot guards no data; a producer panic leaves nothing torn.
            let _producing = slot.lock().unwrap_or_else(|e| e.into_inner());
            match self.get(key) {
                Some(value) => {
                    tracing::debug!(?key, "cache filled while waiting");
                    Ok(value)
                }
                None => {
                    tracing::info!(?key, "cache miss; computing");
                    producer().map(|value| {
                        self.store(key, value.clone(), ttl);
                        value
                    })
                }
            }
        };
        self.release(key, &slot);
        result
    }

    /// Insert a fresh entry, evicting whatever has expired in the meantime.
    fn store(&self, key: &CacheKey, value: V, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.lock();
        entries.retain(|_, e| e.is_fresh(now));
        entries.insert(
            key.clone(),
            Entry {
                value,
                stored_at: now,
                ttl,
            },
        );
    }

    /// Fresh cached value for `key`, if any.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        let now = Instant::now();
        self.lock()
            .get(key)
            .filter(|e| e.is_fresh(now))
            .map(|e| e.value.clone())
    }

    pub fn invalidate(&self, key: &CacheKey) -> bool {
        self.lock().remove(key).is_some()
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, e| e.is_fresh(now));
        before - entries.len()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
