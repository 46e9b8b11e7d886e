//! Persistent trie-backed key–value stores.
//!
//! Kestrel stores fixed-length binary keys and values inside two
//! linearly-grown byte regions, organized as a compressed fixed-arity trie.
//! Two facades share one engine:
//!
//! - [`Enumeration`]: insertion-ordered, monotonically numbered, no deletion
//! - [`TrieMap`]: deletion with in-place slot reuse through free lists
//!
//! All dynamic state lives in the regions; the per-store heap footprint is a
//! handful of counters, so a store can be torn down to `(regions, snapshot)`
//! with [`TrieMap::into_parts`] and resumed with [`TrieMap::unshare`].
//!
//! [`SharedTrieMap`] wraps a map in a single exclusive lock for
//! multi-threaded use.

mod engine;
mod keybits;
mod pointer;

pub mod enumeration;
pub mod iter;
pub mod map;
pub mod shared;
pub mod snapshot;

pub use enumeration::Enumeration;
pub use iter::{Entries, EntriesRev, Keys, KeysRev, Vals, ValsRev};
pub use map::TrieMap;
pub use shared::SharedTrieMap;
pub use snapshot::{MemoryStats, Snapshot};

pub use kestrel_common::{KestrelError, PointerWidth, Result, TrieConfig, MAX_ENTRY_SIZE};
pub use kestrel_region::{Region, PAGE_SIZE};
