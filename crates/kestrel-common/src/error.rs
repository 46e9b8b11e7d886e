//! Error types for the Kestrel store.

use thiserror::Error;

/// Result type alias using KestrelError.
pub type Result<T> = std::result::Result<T, KestrelError>;

/// Errors that can occur in Kestrel operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KestrelError {
    // Configuration errors
    #[error("invalid pointer size {0} (supported: 2, 4, 5, 6, 8)")]
    InvalidPointerSize(u8),

    #[error("invalid aridity {0} (supported: 2, 4, 16, 256)")]
    InvalidAridity(u32),

    #[error("root aridity {0} is not a power of two")]
    RootAridityNotPowerOfTwo(u64),

    #[error("root aridity {root_aridity} is smaller than aridity {aridity}")]
    RootAridityBelowAridity { root_aridity: u64, aridity: u32 },

    #[error("root aridity {0} is too large to address")]
    RootAridityUnaddressable(u64),

    #[error("root consumes {root_bits} bits, not a multiple of the {step_bits}-bit step")]
    RootBitsNotStepAligned { root_bits: u32, step_bits: u32 },

    #[error("root consumes {root_bits} bits but keys hold only {key_bits} bits")]
    RootBitsExceedKey { root_bits: u32, key_bits: u64 },

    #[error("key size must be at least 1 byte")]
    ZeroKeySize,

    #[error("entry size {entry_size} exceeds the 65536-byte maximum")]
    EntryTooLarge { entry_size: usize },

    #[error("entry size {entry_size} is smaller than the {pointer_size}-byte pointer; freed leaves must hold a free-list link")]
    EntryBelowPointerSize { entry_size: usize, pointer_size: u8 },

    // Precondition violations
    #[error("key length {actual} does not match configured key size {expected}")]
    KeyLengthMismatch { expected: usize, actual: usize },

    #[error("value length {actual} does not match configured value size {expected}")]
    ValueLengthMismatch { expected: usize, actual: usize },

    #[error("slice bounds {left}..{right} invalid for leaf count {leaf_count}")]
    SliceOutOfBounds { left: u64, right: u64, leaf_count: u64 },

    #[error("unshare called on an already-initialized store")]
    AlreadyInitialized,

    #[error("snapshot does not match the supplied regions: {0}")]
    SnapshotMismatch(String),

    // Capacity
    #[error("pool limit exceeded: no addressable slots remain")]
    LimitExceeded,

    // Structure damage reported by the consistency checker
    #[error("store is corrupted: {0}")]
    Corrupted(String),
}
