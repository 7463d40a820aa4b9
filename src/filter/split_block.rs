//! In-memory split-block Bloom filter.
//!
//! The filter is a flat byte buffer whose length is a multiple of
//! [`BLOCK_SIZE`]; block `i` occupies bytes `32*i..32*i+32`. The buffer is the
//! serialized form, so writing a filter out is writing its bytes and loading
//! one back is wrapping them.

use super::block::{self, Block, BLOCK_SIZE};
use super::hash;
use super::sizing::{block_count_of, blocks_needed, false_positive_rate};
use super::{Filter, MutableFilter};
use crate::config::Options;
use crate::error::{Error, Result};
use std::fmt;
use std::io::{self, Read, Write};

/// Initial buffer reservation for [`SplitBlockFilter::read_from`].
const READ_CHUNK_SIZE: usize = 64 * 1024;

/// A split-block Bloom filter over a byte buffer `B`.
///
/// `B` defaults to an owned `Vec<u8>`. Any `AsRef<[u8]>` buffer can be
/// wrapped for probing, and any `AsRef<[u8]> + AsMut<[u8]>` buffer for
/// building; writes through the filter land directly in the buffer.
///
/// # Example
/// ```
/// use splitbloom::filter::{Filter, MutableFilter, SplitBlockFilter};
///
/// let mut filter = SplitBlockFilter::with_capacity(1000, 10);
/// filter.insert(0x1);
/// filter.insert(0xdead_beef_cafe_babe);
/// assert!(filter.check(0x1));
///
/// // The bytes are the on-disk image.
/// let loaded = SplitBlockFilter::wrap(filter.as_bytes()).unwrap();
/// assert!(loaded.check(0xdead_beef_cafe_babe));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SplitBlockFilter<B = Vec<u8>> {
    data: B,
    num_blocks: u32,
}

impl SplitBlockFilter {
    /// Allocate an empty filter of `num_blocks` blocks.
    pub fn new(num_blocks: u32) -> Self {
        Self { data: vec![0u8; num_blocks as usize * BLOCK_SIZE], num_blocks }
    }

    /// Allocate an empty filter sized for `num_values` distinct values at
    /// `bits_per_value` bits each. Always has at least one block.
    pub fn with_capacity(num_values: u64, bits_per_value: u32) -> Self {
        let num_blocks = blocks_needed(num_values, bits_per_value).clamp(1, u32::MAX as usize) as u32;
        log::debug!(
            "Sizing bloom filter: {} values at {} bits/value -> {} blocks",
            num_values,
            bits_per_value,
            num_blocks
        );
        Self::new(num_blocks)
    }

    /// Allocate an empty filter sized for `num_values` using `options`.
    pub fn for_values(num_values: u64, options: &Options) -> Result<Self> {
        options.validate()?;
        Ok(Self::with_capacity(num_values, options.bits_per_value))
    }

    /// Load a filter by reading exactly `byte_len` bytes from `reader`.
    ///
    /// `byte_len` is not trusted: the buffer grows as bytes arrive, so a bogus
    /// length fails with `UnexpectedEof` rather than allocating up front.
    pub fn read_from<R: Read + ?Sized>(reader: &mut R, byte_len: usize) -> Result<Self> {
        let num_blocks = block_count_of(byte_len as u64)?;
        let mut data = Vec::with_capacity(byte_len.min(READ_CHUNK_SIZE));
        (&mut *reader).take(byte_len as u64).read_to_end(&mut data)?;
        if data.len() != byte_len {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("bloom filter truncated: expected {} bytes, read {}", byte_len, data.len()),
            )));
        }
        Ok(Self { data, num_blocks })
    }

    /// Take the filter's bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl<B: AsRef<[u8]>> SplitBlockFilter<B> {
    /// Wrap an existing buffer without copying.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the buffer length is not a multiple of
    /// [`BLOCK_SIZE`] or holds more than `u32::MAX` blocks.
    pub fn wrap(data: B) -> Result<Self> {
        let num_blocks = block_count_of(data.as_ref().len() as u64)?;
        Ok(Self { data, num_blocks })
    }

    /// Number of blocks in the filter.
    pub fn num_blocks(&self) -> usize {
        self.num_blocks as usize
    }

    /// Whether the filter has no blocks.
    pub fn is_empty(&self) -> bool {
        self.num_blocks == 0
    }

    /// The filter's bytes, shared with the filter.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// Unwrap the backing buffer.
    pub fn into_inner(self) -> B {
        self.data
    }

    /// Index of the block `hash` maps to.
    pub fn block_index(&self, hash: u64) -> usize {
        hash::block_index(hash, self.num_blocks) as usize
    }

    /// A copy of the block `hash` maps to, or `None` for an empty filter.
    pub fn block(&self, hash: u64) -> Option<Block> {
        if self.is_empty() {
            return None;
        }
        let offset = self.block_index(hash) * BLOCK_SIZE;
        let mut bytes = [0u8; BLOCK_SIZE];
        bytes.copy_from_slice(&self.as_bytes()[offset..offset + BLOCK_SIZE]);
        Some(Block::from_bytes(bytes))
    }

    /// Expected false positive rate once `num_values` distinct values are in.
    pub fn estimated_false_positive_rate(&self, num_values: u64) -> f64 {
        false_positive_rate(self.num_blocks(), num_values)
    }

    /// Write the filter's bytes to `writer`.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self.as_bytes())?;
        Ok(())
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> SplitBlockFilter<B> {
    /// The filter's bytes, mutably.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.data.as_mut()
    }

    /// Merge `other` into this filter.
    ///
    /// The result answers `check` as if every value inserted into either
    /// filter had been inserted into this one.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if the filters have different block counts.
    pub fn union<O: AsRef<[u8]>>(&mut self, other: &SplitBlockFilter<O>) -> Result<()> {
        if self.num_blocks != other.num_blocks {
            return Err(Error::SizeMismatch {
                expected: self.num_blocks(),
                actual: other.num_blocks(),
            });
        }
        for (dst, src) in self.as_bytes_mut().iter_mut().zip(other.as_bytes()) {
            *dst |= *src;
        }
        Ok(())
    }
}

impl<B: AsRef<[u8]>> Filter for SplitBlockFilter<B> {
    #[inline]
    fn check(&self, hash: u64) -> bool {
        if self.is_empty() {
            return false;
        }
        let offset = self.block_index(hash) * BLOCK_SIZE;
        block::check_fragment(&self.as_bytes()[offset..offset + BLOCK_SIZE], hash::fragment(hash))
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> MutableFilter for SplitBlockFilter<B> {
    fn reset(&mut self) {
        self.as_bytes_mut().fill(0);
    }

    #[inline]
    fn insert(&mut self, hash: u64) {
        // An empty filter has nowhere to record the value.
        if self.is_empty() {
            return;
        }
        let offset = self.block_index(hash) * BLOCK_SIZE;
        block::insert_fragment(
            &mut self.as_bytes_mut()[offset..offset + BLOCK_SIZE],
            hash::fragment(hash),
        );
    }

    fn insert_bulk(&mut self, hashes: &[u64]) {
        for &hash in hashes {
            self.insert(hash);
        }
    }

    fn bytes(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<B> fmt::Debug for SplitBlockFilter<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitBlockFilter").field("num_blocks", &self.num_blocks).finish()
    }
}
