//! Per-key serialization of read-modify-write sequences
//!
//! Balance updates are a read, a compute, and two writes against external
//! stores. `KeyedLocks` hands out one mutex per key so that two sequences on
//! the same account never interleave, while different accounts proceed in
//! parallel.
//!
//! The DashMap shard guard is released before the per-key mutex is taken,
//! so waiting on a busy account never blocks lookups of other keys. An entry
//! is dropped again once no caller holds or waits on it, so the map only ever
//! holds keys that are in use.

use dashmap::DashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Lazily created mutex per key
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Run `f` while holding the lock for `key`
    ///
    /// A poisoned lock is recovered: the guarded data is `()`, so a panic in a
    /// previous holder cannot leave it inconsistent.
    pub fn with_lock<T>(&self, key: &str, f: impl FnOnce() -> T) -> T {
        let lock = Arc::clone(self.locks.entry(key.to_string()).or_default().value());
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };
        drop(lock);

        // New holders clone under the shard lock, so a count of one here means
        // nobody else can reach this mutex.
        self.locks.remove_if(key, |_, held| Arc::strong_count(held) == 1);
        result
    }

    /// Number of keys currently held or waited on
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
