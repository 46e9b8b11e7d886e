//! Map facade with deletion and slot reuse.

use bytes::Bytes;

use kestrel_common::{Result, TrieConfig};
use kestrel_region::Region;

use crate::engine::TrieEngine;
use crate::iter::{Entries, EntriesRev, Keys, KeysRev, Vals, ValsRev};
use crate::snapshot::{MemoryStats, Snapshot};

/// Mutable key–value store with deletion.
///
/// Freed leaves and nodes go onto LIFO free lists and are handed back out by
/// later insertions, so a delete-heavy workload stays within the region
/// space it has already claimed. Leaf indices are stable while an entry
/// lives but may be recycled after its removal.
///
/// The `try_*` operations report pool exhaustion as
/// [`KestrelError::LimitExceeded`](kestrel_common::KestrelError::LimitExceeded)
/// and leave every stored entry intact; their unchecked counterparts panic
/// instead.
pub struct TrieMap {
    engine: TrieEngine,
}

impl TrieMap {
    /// Creates an empty map. Regions are not allocated until the first
    /// insertion.
    ///
    /// On top of the common configuration rules, a map requires
    /// `key_size + value_size >= pointer_size` so freed leaves can hold
    /// their free-list link.
    pub fn new(config: TrieConfig) -> Result<Self> {
        let width = config.validate_for_map()?;
        Ok(Self {
            engine: TrieEngine::new(config, width),
        })
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &TrieConfig {
        self.engine.config()
    }

    /// Inserts or overwrites `key`.
    pub fn try_put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.engine.check_key(key)?;
        self.engine.check_value(value)?;
        let (_, index) = self.engine.insert_key(key)?;
        self.engine.write_value(index, value);
        Ok(())
    }

    /// Unchecked [`try_put`](TrieMap::try_put).
    ///
    /// # Panics
    ///
    /// Panics on pool exhaustion or length mismatch.
    pub fn put(&mut self, key: &[u8], value: &[u8]) {
        if let Err(err) = self.try_put(key, value) {
            panic!("put failed: {err}");
        }
    }

    /// Inserts or overwrites `key`, returning the previous value if any.
    pub fn try_replace(&mut self, key: &[u8], value: &[u8]) -> Result<Option<Bytes>> {
        self.engine.check_key(key)?;
        self.engine.check_value(value)?;
        let (added, index) = self.engine.insert_key(key)?;
        let previous =
            (!added).then(|| Bytes::copy_from_slice(self.engine.leaf_value(index)));
        self.engine.write_value(index, value);
        Ok(previous)
    }

    /// Unchecked [`try_replace`](TrieMap::try_replace).
    ///
    /// # Panics
    ///
    /// Panics on pool exhaustion or length mismatch.
    pub fn replace(&mut self, key: &[u8], value: &[u8]) -> Option<Bytes> {
        match self.try_replace(key, value) {
            Ok(previous) => previous,
            Err(err) => panic!("replace failed: {err}"),
        }
    }

    /// Inserts `key` if absent; returns the existing value otherwise,
    /// leaving it untouched.
    pub fn try_get_or_put(&mut self, key: &[u8], value: &[u8]) -> Result<Option<Bytes>> {
        self.engine.check_key(key)?;
        self.engine.check_value(value)?;
        let (added, index) = self.engine.insert_key(key)?;
        if added {
            self.engine.write_value(index, value);
            Ok(None)
        } else {
            Ok(Some(Bytes::copy_from_slice(self.engine.leaf_value(index))))
        }
    }

    /// Unchecked [`try_get_or_put`](TrieMap::try_get_or_put).
    ///
    /// # Panics
    ///
    /// Panics on pool exhaustion or length mismatch.
    pub fn get_or_put(&mut self, key: &[u8], value: &[u8]) -> Option<Bytes> {
        match self.try_get_or_put(key, value) {
            Ok(existing) => existing,
            Err(err) => panic!("get_or_put failed: {err}"),
        }
    }

    /// Removes `key`, returning its value. Absent keys are a no-op.
    pub fn remove(&mut self, key: &[u8]) -> Result<Option<Bytes>> {
        self.engine.check_key(key)?;
        Ok(self.engine.remove_key(key))
    }

    /// Removes `key`, discarding the value.
    pub fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.remove(key).map(|_| ())
    }

    /// Looks `key` up, returning its value and current leaf index.
    pub fn lookup(&self, key: &[u8]) -> Result<Option<(Bytes, u64)>> {
        self.engine.check_key(key)?;
        Ok(self.engine.lookup_key(key).map(|index| {
            (
                Bytes::copy_from_slice(self.engine.leaf_value(index)),
                index,
            )
        }))
    }

    /// Returns true if `key` is stored.
    pub fn contains_key(&self, key: &[u8]) -> Result<bool> {
        self.engine.check_key(key)?;
        Ok(self.engine.lookup_key(key).is_some())
    }

    /// Ascending `(key, value)` iterator.
    pub fn entries(&self) -> Entries<'_> {
        Entries::new(&self.engine)
    }

    /// Descending `(key, value)` iterator.
    pub fn entries_rev(&self) -> EntriesRev<'_> {
        EntriesRev::new(&self.engine)
    }

    /// Ascending key iterator.
    pub fn keys(&self) -> Keys<'_> {
        Keys(self.entries())
    }

    /// Descending key iterator.
    pub fn keys_rev(&self) -> KeysRev<'_> {
        KeysRev(self.entries_rev())
    }

    /// Ascending value iterator.
    pub fn vals(&self) -> Vals<'_> {
        Vals(self.entries())
    }

    /// Descending value iterator.
    pub fn vals_rev(&self) -> ValsRev<'_> {
        ValsRev(self.entries_rev())
    }

    /// Number of live entries.
    pub fn size(&self) -> u64 {
        self.engine.live_leaf_count()
    }

    /// Returns true if no entries are live.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Allocated leaf slots, free-listed ones included.
    pub fn leaf_count(&self) -> u64 {
        self.engine.leaf_count()
    }

    /// Allocated node slots, the root and free-listed ones included.
    pub fn node_count(&self) -> u64 {
        self.engine.node_count()
    }

    /// Node slots currently in use by the trie.
    pub fn live_node_count(&self) -> u64 {
        self.engine.live_node_count()
    }

    /// Point-in-time size counters.
    pub fn memory_stats(&self) -> MemoryStats {
        self.engine.memory_stats()
    }

    /// Snapshots the O(1) header, initializing the store first if needed.
    pub fn share(&mut self) -> Snapshot {
        self.engine.share()
    }

    /// Resumes over a previously extracted region pair and snapshot.
    ///
    /// Must be the first operation on this store; fails with
    /// [`KestrelError::AlreadyInitialized`](kestrel_common::KestrelError::AlreadyInitialized)
    /// otherwise.
    pub fn unshare(&mut self, snapshot: Snapshot, nodes: Region, leaves: Region) -> Result<()> {
        self.engine.unshare(snapshot, nodes, leaves)
    }

    /// Tears the store down into its regions and header snapshot.
    pub fn into_parts(self) -> (Region, Region, Snapshot) {
        self.engine.into_parts()
    }

    /// Verifies internal structure and bookkeeping. Intended for tests and
    /// debugging; linear in the store size.
    pub fn check_consistency(&self) -> Result<()> {
        self.engine.check_consistency()
    }
}
