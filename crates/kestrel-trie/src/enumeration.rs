//! Insertion-ordered enumeration facade.

use bytes::Bytes;

use kestrel_common::{KestrelError, Result, TrieConfig};
use kestrel_region::Region;

use crate::engine::TrieEngine;
use crate::iter::{Entries, EntriesRev, Keys, KeysRev, Vals, ValsRev};
use crate::snapshot::{MemoryStats, Snapshot};

/// Insertion-ordered key–value store.
///
/// Every distinct key receives a stable index — 0, 1, 2, … in insertion
/// order. Re-adding an existing key rewrites its value in place and keeps
/// the index. Enumerations never delete, so indices stay dense and
/// [`get`](Enumeration::get) / [`slice`](Enumeration::slice) read leaves
/// directly by position.
pub struct Enumeration {
    engine: TrieEngine,
}

impl Enumeration {
    /// Creates an empty enumeration. Regions are not allocated until the
    /// first insertion.
    pub fn new(config: TrieConfig) -> Result<Self> {
        let width = config.validate()?;
        Ok(Self {
            engine: TrieEngine::new(config, width),
        })
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &TrieConfig {
        self.engine.config()
    }

    /// Inserts `key` or rewrites its value, returning the entry's index.
    ///
    /// Fresh keys take the next index in sequence; existing keys keep
    /// theirs.
    pub fn add(&mut self, key: &[u8], value: &[u8]) -> Result<u64> {
        self.engine.check_key(key)?;
        self.engine.check_value(value)?;
        let (_, index) = self.engine.insert_key(key)?;
        self.engine.write_value(index, value);
        Ok(index)
    }

    /// Looks `key` up, returning its value and index.
    pub fn lookup(&self, key: &[u8]) -> Result<Option<(Bytes, u64)>> {
        self.engine.check_key(key)?;
        Ok(self.engine.lookup_key(key).map(|index| {
            (
                Bytes::copy_from_slice(self.engine.leaf_value(index)),
                index,
            )
        }))
    }

    /// Reads the entry at `index` in O(1). `None` past the end.
    pub fn get(&self, index: u64) -> Option<(Bytes, Bytes)> {
        if index >= self.engine.leaf_count() {
            return None;
        }
        Some((
            Bytes::copy_from_slice(self.engine.leaf_key(index)),
            Bytes::copy_from_slice(self.engine.leaf_value(index)),
        ))
    }

    /// Reads entries `left..right` in insertion order.
    pub fn slice(&self, left: u64, right: u64) -> Result<Vec<(Bytes, Bytes)>> {
        if right > self.engine.leaf_count() || left > right {
            return Err(KestrelError::SliceOutOfBounds {
                left,
                right,
                leaf_count: self.engine.leaf_count(),
            });
        }
        Ok((left..right)
            .map(|index| {
                (
                    Bytes::copy_from_slice(self.engine.leaf_key(index)),
                    Bytes::copy_from_slice(self.engine.leaf_value(index)),
                )
            })
            .collect())
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

    /// Number of stored entries.
    pub fn size(&self) -> u64 {
        self.engine.leaf_count()
    }

    /// Returns true if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Allocated leaf slots.
    pub fn leaf_count(&self) -> u64 {
        self.engine.leaf_count()
    }

    /// Allocated node slots, including the root.
    pub fn node_count(&self) -> u64 {
        self.engine.node_count()
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
    /// [`KestrelError::AlreadyInitialized`] otherwise.
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

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Enumeration {
        Enumeration::new(TrieConfig {
            pointer_size: 2,
            aridity: 2,
            root_aridity: 2,
            key_size: 2,
            value_size: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = Enumeration::new(TrieConfig {
            pointer_size: 7,
            aridity: 2,
            root_aridity: 2,
            key_size: 2,
            value_size: 1,
        });
        assert!(matches!(result, Err(KestrelError::InvalidPointerSize(7))));
    }

    #[test]
    fn test_add_assigns_dense_indices() {
        let mut store = store();
        assert_eq!(store.add(b"ab", b"X").unwrap(), 0);
        assert_eq!(store.add(b"cd", b"Y").unwrap(), 1);
        assert_eq!(store.add(b"ef", b"Z").unwrap(), 2);
        assert_eq!(store.size(), 3);
    }

    #[test]
    fn test_add_existing_rewrites_value_in_place() {
        let mut store = store();
        assert_eq!(store.add(b"ab", b"X").unwrap(), 0);
        assert_eq!(store.add(b"cd", b"Y").unwrap(), 1);
        assert_eq!(store.add(b"ab", b"Z").unwrap(), 0);

        let (value, index) = store.lookup(b"ab").unwrap().unwrap();
        assert_eq!(value.as_ref(), b"Z");
        assert_eq!(index, 0);
        assert_eq!(store.size(), 2);
    }

    #[test]
    fn test_lookup_absent() {
        let mut store = store();
        store.add(b"ab", b"X").unwrap();
        assert_eq!(store.lookup(b"ef").unwrap(), None);
    }

    #[test]
    fn test_lookup_checks_key_length() {
        let store = store();
        assert_eq!(
            store.lookup(b"abc"),
            Err(KestrelError::KeyLengthMismatch {
                expected: 2,
                actual: 3,
            })
        );
    }

    #[test]
    fn test_add_checks_value_length() {
        let mut store = store();
        assert_eq!(
            store.add(b"ab", b"XY"),
            Err(KestrelError::ValueLengthMismatch {
                expected: 1,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_get_reads_by_insertion_index() {
        let mut store = store();
        store.add(b"cd", b"Y").unwrap();
        store.add(b"ab", b"X").unwrap();

        let (key, value) = store.get(0).unwrap();
        assert_eq!(key.as_ref(), b"cd");
        assert_eq!(value.as_ref(), b"Y");

        let (key, value) = store.get(1).unwrap();
        assert_eq!(key.as_ref(), b"ab");
        assert_eq!(value.as_ref(), b"X");

        assert_eq!(store.get(2), None);
    }

    #[test]
    fn test_slice_returns_insertion_order() {
        let mut store = store();
        store.add(b"zz", b"0").unwrap();
        store.add(b"aa", b"1").unwrap();
        store.add(b"mm", b"2").unwrap();

        let middle = store.slice(1, 3).unwrap();
        assert_eq!(middle.len(), 2);
        assert_eq!(middle[0].0.as_ref(), b"aa");
        assert_eq!(middle[1].0.as_ref(), b"mm");

        assert!(store.slice(0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_slice_rejects_bad_bounds() {
        let mut store = store();
        store.add(b"ab", b"X").unwrap();

        assert_eq!(
            store.slice(0, 2),
            Err(KestrelError::SliceOutOfBounds {
                left: 0,
                right: 2,
                leaf_count: 1,
            })
        );
        assert!(store.slice(1, 0).is_err());
    }

    #[test]
    fn test_entries_sorted_by_key_bytes() {
        let mut store = store();
        store.add(b"cd", b"Y").unwrap();
        store.add(b"ab", b"X").unwrap();
        store.add(b"ce", b"Z").unwrap();

        let keys: Vec<Bytes> = store.keys().collect();
        assert_eq!(keys, vec![
            Bytes::from_static(b"ab"),
            Bytes::from_static(b"cd"),
            Bytes::from_static(b"ce"),
        ]);

        let reversed: Vec<Bytes> = store.keys_rev().collect();
        assert_eq!(reversed, keys.iter().rev().cloned().collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_store_iterators() {
        let store = store();
        assert_eq!(store.entries().count(), 0);
        assert_eq!(store.entries_rev().count(), 0);
        assert_eq!(store.size(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_share_unshare_roundtrip() {
        let mut store = store();
        store.add(b"ab", b"X").unwrap();
        store.add(b"cd", b"Y").unwrap();
        let (nodes, leaves, snapshot) = store.into_parts();

        let mut resumed = self::store();
        resumed.unshare(snapshot, nodes, leaves).unwrap();
        assert_eq!(resumed.size(), 2);
        let (value, index) = resumed.lookup(b"ab").unwrap().unwrap();
        assert_eq!(value.as_ref(), b"X");
        assert_eq!(index, 0);

        // Indices keep climbing from where the donor stopped.
        assert_eq!(resumed.add(b"ef", b"Z").unwrap(), 2);
        resumed.check_consistency().unwrap();
    }

    #[test]
    fn test_unshare_must_come_first() {
        let mut donor = store();
        donor.add(b"ab", b"X").unwrap();
        let (nodes, leaves, snapshot) = donor.into_parts();

        let mut late = store();
        late.add(b"cd", b"Y").unwrap();
        assert_eq!(
            late.unshare(snapshot, nodes, leaves),
            Err(KestrelError::AlreadyInitialized)
        );
    }

    #[test]
    fn test_memory_stats_track_regions() {
        let mut store = store();
        assert_eq!(store.memory_stats().nodes_region_bytes, 0);

        store.add(b"ab", b"X").unwrap();
        let stats = store.memory_stats();
        assert_eq!(stats.node_count, 1);
        assert_eq!(stats.leaf_count, 1);
        assert_eq!(stats.empty_node_count, 0);
        assert_eq!(stats.empty_leaf_count, 0);
        assert!(stats.nodes_region_bytes > 0);
        assert!(stats.leaves_region_bytes > 0);
    }
}
