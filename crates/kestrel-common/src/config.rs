//! Store configuration and derived geometry.

use serde::{Deserialize, Serialize};

use crate::error::{KestrelError, Result};
use crate::types::PointerWidth;

/// Maximum bytes a single leaf (key plus value) may occupy.
pub const MAX_ENTRY_SIZE: usize = 65536;

/// Shape of a trie store, fixed at construction.
///
/// Every field participates in the on-region layout, so two stores can only
/// exchange regions and snapshots when their configurations are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieConfig {
    /// Width in bytes of every on-region pointer (2, 4, 5, 6, or 8).
    pub pointer_size: u8,
    /// Children per non-root internal node (2, 4, 16, or 256).
    pub aridity: u32,
    /// Children of the root node: a power of two, at least `aridity`, at
    /// most `2^(8 · key_size)`.
    pub root_aridity: u64,
    /// Byte length of every key (at least 1).
    pub key_size: usize,
    /// Byte length of every value; 0 makes the store a set.
    pub value_size: usize,
}

impl TrieConfig {
    /// Validates the configuration, returning the typed pointer width.
    pub fn validate(&self) -> Result<PointerWidth> {
        let width = PointerWidth::from_byte(self.pointer_size)
            .ok_or(KestrelError::InvalidPointerSize(self.pointer_size))?;

        if !matches!(self.aridity, 2 | 4 | 16 | 256) {
            return Err(KestrelError::InvalidAridity(self.aridity));
        }
        if !self.root_aridity.is_power_of_two() {
            return Err(KestrelError::RootAridityNotPowerOfTwo(self.root_aridity));
        }
        if self.root_aridity < u64::from(self.aridity) {
            return Err(KestrelError::RootAridityBelowAridity {
                root_aridity: self.root_aridity,
                aridity: self.aridity,
            });
        }
        // The root node must be allocatable in one piece.
        let root_bytes = u128::from(self.root_aridity) * u128::from(self.pointer_size);
        if root_bytes > isize::MAX as u128 {
            return Err(KestrelError::RootAridityUnaddressable(self.root_aridity));
        }
        let root_bits = self.root_bits();
        let step_bits = self.step_bits();
        if root_bits % step_bits != 0 {
            return Err(KestrelError::RootBitsNotStepAligned {
                root_bits,
                step_bits,
            });
        }
        if self.key_size == 0 {
            return Err(KestrelError::ZeroKeySize);
        }
        let key_bits = self.key_size as u64 * 8;
        if u64::from(root_bits) > key_bits {
            return Err(KestrelError::RootBitsExceedKey {
                root_bits,
                key_bits,
            });
        }
        let entry_size = self.key_size + self.value_size;
        if entry_size > MAX_ENTRY_SIZE {
            return Err(KestrelError::EntryTooLarge { entry_size });
        }
        Ok(width)
    }

    /// Validates for the Map facade, which additionally needs each leaf to
    /// be able to hold a free-list link.
    pub fn validate_for_map(&self) -> Result<PointerWidth> {
        let width = self.validate()?;
        let entry_size = self.key_size + self.value_size;
        if entry_size < width.bytes() {
            return Err(KestrelError::EntryBelowPointerSize {
                entry_size,
                pointer_size: self.pointer_size,
            });
        }
        Ok(width)
    }

    /// Key bits consumed per trie level below the root.
    pub fn step_bits(&self) -> u32 {
        self.aridity.trailing_zeros()
    }

    /// Key bits consumed by the root node.
    pub fn root_bits(&self) -> u32 {
        self.root_aridity.trailing_zeros()
    }

    /// Bytes per non-root internal node.
    pub fn node_size(&self) -> usize {
        self.aridity as usize * self.pointer_size as usize
    }

    /// Bytes occupied by the root node.
    pub fn root_size(&self) -> usize {
        self.root_aridity as usize * self.pointer_size as usize
    }

    /// Bytes per leaf: key followed by value.
    pub fn leaf_size(&self) -> usize {
        self.key_size + self.value_size
    }

    /// Upper bound on descent depth, root frame included.
    pub fn max_depth(&self) -> usize {
        let key_bits = self.key_size * 8;
        let below_root = (key_bits - self.root_bits() as usize) / self.step_bits() as usize;
        below_root + 1
    }
}
