//! Thread-safe map wrapper.

use bytes::Bytes;
use parking_lot::Mutex;

use kestrel_common::{Result, TrieConfig};

use crate::map::TrieMap;
use crate::snapshot::MemoryStats;

/// A [`TrieMap`] behind a single exclusive lock.
///
/// Every operation locks the whole engine, and iteration materializes under
/// the lock. All trie operations pass through the root, so finer-grained
/// locking would not add parallelism.
pub struct SharedTrieMap {
    inner: Mutex<TrieMap>,
}

impl SharedTrieMap {
    /// Creates an empty shared map.
    pub fn new(config: TrieConfig) -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(TrieMap::new(config)?),
        })
    }

    /// Wraps an existing map.
    pub fn from_map(map: TrieMap) -> Self {
        Self {
            inner: Mutex::new(map),
        }
    }

    /// Inserts or overwrites `key`.
    pub fn try_put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.inner.lock().try_put(key, value)
    }

    /// Unchecked [`try_put`](SharedTrieMap::try_put); panics on failure.
    pub fn put(&self, key: &[u8], value: &[u8]) {
        self.inner.lock().put(key, value)
    }

    /// Inserts or overwrites `key`, returning the previous value if any.
    pub fn try_replace(&self, key: &[u8], value: &[u8]) -> Result<Option<Bytes>> {
        self.inner.lock().try_replace(key, value)
    }

    /// Inserts `key` if absent; returns the existing value otherwise.
    pub fn try_get_or_put(&self, key: &[u8], value: &[u8]) -> Result<Option<Bytes>> {
        self.inner.lock().try_get_or_put(key, value)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&self, key: &[u8]) -> Result<Option<Bytes>> {
        self.inner.lock().remove(key)
    }

    /// Removes `key`, discarding the value.
    pub fn delete(&self, key: &[u8]) -> Result<()> {
        self.inner.lock().delete(key)
    }

    /// Looks `key` up, returning its value and current leaf index.
    pub fn lookup(&self, key: &[u8]) -> Result<Option<(Bytes, u64)>> {
        self.inner.lock().lookup(key)
    }

    /// Returns true if `key` is stored.
    pub fn contains_key(&self, key: &[u8]) -> Result<bool> {
        self.inner.lock().contains_key(key)
    }

    /// All entries in ascending key order, collected under the lock.
    pub fn entries(&self) -> Vec<(Bytes, Bytes)> {
        self.inner.lock().entries().collect()
    }

    /// All entries in descending key order, collected under the lock.
    pub fn entries_rev(&self) -> Vec<(Bytes, Bytes)> {
        self.inner.lock().entries_rev().collect()
    }

    /// All keys in ascending order, collected under the lock.
    pub fn keys(&self) -> Vec<Bytes> {
        self.inner.lock().keys().collect()
    }

    /// All values in ascending key order, collected under the lock.
    pub fn vals(&self) -> Vec<Bytes> {
        self.inner.lock().vals().collect()
    }

    /// Number of live entries.
    pub fn size(&self) -> u64 {
        self.inner.lock().size()
    }

    /// Returns true if no entries are live.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Point-in-time size counters.
    pub fn memory_stats(&self) -> MemoryStats {
        self.inner.lock().memory_stats()
    }

    /// Runs `f` with the lock held, for compound operations that must not
    /// interleave with other writers.
    pub fn with<R>(&self, f: impl FnOnce(&mut TrieMap) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Unwraps the inner map.
    pub fn into_inner(self) -> TrieMap {
        self.inner.into_inner()
    }
}
