use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;
use parking_lot::{Mutex, RwLock};

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> ManualClock {
        ManualClock {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.elapsed.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        ManualClock::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.elapsed.lock()
    }
}

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Time-bounded memo of loaded values.
///
/// Entries expire `ttl` after insertion. A zero `ttl` turns the cache into a
/// pass-through. Loading happens outside the lock, so two callers racing on
/// the same missing key may both run the loader; the later insert wins.
pub struct TtlCache<K, V> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: RwLock<HashMap<K, Entry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> TtlCache<K, V> {
        TtlCache::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> TtlCache<K, V> {
        TtlCache {
            ttl,
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn is_fresh(&self, entry: &Entry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted_at) < self.ttl
    }

    /// The cached value for `key`, if it has not expired yet.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| entry.value.clone())
    }

    pub fn get_or_load<F>(&self, key: K, loader: F) -> V
    where
        F: FnOnce() -> V,
    {
        if self.ttl.is_zero() {
            return loader();
        }

        if let Some(value) = self.get(&key) {
            debug!("cache hit");
            return value;
        }

        debug!("cache miss, loading");
        let value = loader();
        let inserted_at = self.clock.now();
        self.entries.write().insert(
            key,
            Entry {
                value: value.clone(),
                inserted_at,
            },
        );

        value
    }

    pub fn invalidate(&self, key: &K) {
        self.entries.write().remove(key);
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl;
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| now.saturating_duration_since(entry.inserted_at) < ttl);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
