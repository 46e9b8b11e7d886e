//! Byte-region primitive for the Kestrel store.
//!
//! This crate provides:
//! - `Region`: a linearly-grown byte buffer with 64 KiB page granularity
//!   and little-endian scalar accessors
//! - The fixed-width pointer codec (2/4/5/6/8-byte little-endian integers)

mod codec;
mod region;

pub use codec::{load_ptr, store_ptr};
pub use region::{Region, PAGE_SIZE};
