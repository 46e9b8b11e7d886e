//! Header snapshot and memory statistics.

use serde::{Deserialize, Serialize};

/// O(1) resumable state of a store: pool counters and free-list heads.
///
/// Obtained from `share`; feed it back to `unshare` together with the two
/// regions (same configuration) to resume. Free-list fields hold the
/// pointer width's all-ones sentinel when the list is empty — always so for
/// an [`Enumeration`](crate::Enumeration), which never frees slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Allocated node slots, including the root.
    pub node_count: u64,
    /// Allocated leaf slots.
    pub leaf_count: u64,
    /// Head of the node free list.
    pub empty_nodes_head: u64,
    /// Head of the leaf free list.
    pub empty_leaves_head: u64,
    /// Nodes currently threaded on the free list.
    pub empty_node_count: u64,
    /// Leaves currently threaded on the free list.
    pub empty_leaf_count: u64,
}

/// Point-in-time size counters for a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryStats {
    /// Allocated node slots, including the root.
    pub node_count: u64,
    /// Allocated leaf slots.
    pub leaf_count: u64,
    /// Node slots waiting on the free list.
    pub empty_node_count: u64,
    /// Leaf slots waiting on the free list.
    pub empty_leaf_count: u64,
    /// Bytes held by the nodes region.
    pub nodes_region_bytes: usize,
    /// Bytes held by the leaves region.
    pub leaves_region_bytes: usize,
}
