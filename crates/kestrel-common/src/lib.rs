//! Kestrel common types, errors, and configuration.
//!
//! This crate provides shared definitions used across all Kestrel components.

pub mod config;
pub mod error;
pub mod types;

pub use config::{TrieConfig, MAX_ENTRY_SIZE};
pub use error::{KestrelError, Result};
pub use types::PointerWidth;
