//! # splitbloom - Split-Block Bloom Filters
//!
//! splitbloom implements the split-block Bloom filter used by columnar file
//! formats to let readers skip column chunks that cannot contain a value.
//! The byte layout is the Parquet bloom filter page layout, so filters built
//! here can be read by other tools and vice versa.
//!
//! ## Architecture
//!
//! - **Block**: 32 bytes, eight 32-bit words, one salted bit per word per value
//! - **Hash reduction**: high hash half picks the block, low half the bits
//! - **SplitBlockFilter**: a flat run of blocks over any byte buffer
//! - **Disk probe**: checks one value with a single 32-byte positional read
//! - **Block pool**: scratch blocks shared by concurrent probes
//!
//! Values enter as 64-bit hashes; choosing the hash function is up to the caller.
//!
//! ## Example Usage
//!
//! ```rust
//! use splitbloom::filter::{Filter, MutableFilter, SplitBlockFilter};
//! use splitbloom::probe::check_split_block;
//!
//! # fn main() -> Result<(), splitbloom::Error> {
//! // Build a filter for 1000 values at 10 bits per value
//! let mut filter = SplitBlockFilter::with_capacity(1000, 10);
//! filter.insert_bulk(&[0x1, 0x2, 0xdead_beef_cafe_babe]);
//! assert!(filter.check(0x2));
//!
//! // Store it, then probe the stored bytes without loading them
//! let stored: Vec<u8> = filter.into_bytes();
//! assert!(check_split_block(&stored, stored.len() as u64, 0xdead_beef_cafe_babe)?);
//!
//! // Or load it back wholesale
//! let loaded = SplitBlockFilter::wrap(stored)?;
//! assert!(loaded.check(0x1));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Module declarations
pub mod config;
pub mod error;
pub mod filter;
pub mod pool;
pub mod probe;

// Re-exports
pub use config::Options;
pub use error::{Error, Result};
pub use filter::{blocks_needed, Block, Filter, MutableFilter, SharedFilter, SplitBlockFilter, BLOCK_SIZE};
pub use pool::{BlockPool, PoolStats};
pub use probe::{check_split_block, ReadAt, RemoteFilter};
