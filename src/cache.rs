use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;

/// Bounded LRU map whose entries expire a fixed `ttl` after insertion.
/// Expired entries are dropped lazily on lookup.
pub struct TimedLruCache<K: Hash + Eq, V: Clone> {
  entries: Mutex<LruCache<K, (Instant, V)>>,
  ttl: Duration,
}

impl<K: Hash + Eq, V: Clone> TimedLruCache<K, V> {
  pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
    Self {
      entries: Mutex::new(LruCache::new(capacity)),
      ttl,
    }
  }

  pub fn get_cached(&self, key: &K) -> Option<V> {
    let mut entries = self.entries.lock().ok()?;
    let fresh = entries
      .get(key)
      .filter(|(deadline, _)| Instant::now() < *deadline)
      .map(|(_, value)| value.clone());

    if fresh.is_none() {
      entries.pop(key);
    }
    fresh
  }

  pub fn insert(&self, key: K, value: V) {
    let deadline = Instant::now() + self.ttl;
    if let Ok(mut entries) = self.entries.lock() {
      entries.put(key, (deadline, value));
    }
  }
}
