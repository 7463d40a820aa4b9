//! Single-block probes against a serialized filter.

use super::ReadAt;
use crate::error::{Error, Result};
use crate::filter::{block_count_of, hash, BLOCK_SIZE};
use crate::pool::BlockPool;
use std::io;

/// Check `hash` against the filter of `byte_len` bytes stored at the start of
/// `source`, reading only the block it maps to.
///
/// Uses the process-wide [`BlockPool`] for the scratch block.
///
/// # Errors
///
/// - `InvalidArgument` if `byte_len` is not a multiple of [`BLOCK_SIZE`].
/// - `ShortRead` if the block could not be read in full.
///
/// # Example
/// ```
/// use splitbloom::filter::{MutableFilter, SplitBlockFilter};
/// use splitbloom::probe::check_split_block;
///
/// let mut filter = SplitBlockFilter::new(4);
/// filter.insert(0x1);
///
/// let stored = filter.into_bytes();
/// assert!(check_split_block(&stored, 128, 0x1).unwrap());
/// assert!(check_split_block(&stored, 33, 0x1).is_err());
/// ```
pub fn check_split_block<R: ReadAt + ?Sized>(source: &R, byte_len: u64, hash: u64) -> Result<bool> {
    let num_blocks = block_count_of(byte_len)?;
    probe(source, BlockPool::global(), 0, num_blocks, hash)
}

/// A serialized filter inside a [`ReadAt`] source.
///
/// The length is validated once at construction; each [`check`](Self::check)
/// then issues one 32-byte read.
///
/// # Example
/// ```
/// use splitbloom::filter::{MutableFilter, SplitBlockFilter};
/// use splitbloom::probe::RemoteFilter;
///
/// let mut filter = SplitBlockFilter::new(2);
/// filter.insert(42);
///
/// // A filter page body following a 16-byte header.
/// let mut page = vec![0xffu8; 16];
/// page.extend_from_slice(filter.as_bytes());
///
/// let remote = RemoteFilter::at_offset(page, 16, 64).unwrap();
/// assert!(remote.check(42).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct RemoteFilter<R> {
    source: R,
    offset: u64,
    num_blocks: u32,
}

impl<R: ReadAt> RemoteFilter<R> {
    /// A filter of `byte_len` bytes at the start of `source`.
    pub fn new(source: R, byte_len: u64) -> Result<Self> {
        Self::at_offset(source, 0, byte_len)
    }

    /// A filter of `byte_len` bytes starting at `offset` in `source`.
    pub fn at_offset(source: R, offset: u64, byte_len: u64) -> Result<Self> {
        let num_blocks = block_count_of(byte_len)?;
        if offset.checked_add(byte_len).is_none() {
            return Err(Error::invalid_argument(format!(
                "bloom filter at offset {} with length {} overflows",
                offset, byte_len
            )));
        }
        Ok(Self { source, offset, num_blocks })
    }

    /// Number of blocks in the filter.
    pub fn num_blocks(&self) -> usize {
        self.num_blocks as usize
    }

    /// Serialized length of the filter in bytes.
    pub fn byte_len(&self) -> u64 {
        u64::from(self.num_blocks) * BLOCK_SIZE as u64
    }

    /// Offset of the filter in the source.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Get a reference to the source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Unwrap the source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Check `hash` using the process-wide block pool.
    pub fn check(&self, hash: u64) -> Result<bool> {
        self.check_with(BlockPool::global(), hash)
    }

    /// Check `hash` using scratch blocks from `pool`.
    pub fn check_with(&self, pool: &BlockPool, hash: u64) -> Result<bool> {
        probe(&self.source, pool, self.offset, self.num_blocks, hash)
    }
}

fn probe<R: ReadAt + ?Sized>(
    source: &R,
    pool: &BlockPool,
    base: u64,
    num_blocks: u32,
    hash: u64,
) -> Result<bool> {
    if num_blocks == 0 {
        return Ok(false);
    }

    let index = hash::block_index(hash, num_blocks);
    let offset = base + u64::from(index) * BLOCK_SIZE as u64;
    let fragment = hash::fragment(hash);
    log::trace!("Probing bloom filter block {} at offset {}", index, offset);

    let mut block = pool.acquire();
    let (bytes_read, failure) = read_full_at(source, block.as_bytes_mut(), offset);
    match failure {
        None => Ok(block.check(fragment)),
        Some(source) => {
            // Stale bytes from an earlier loan must not leak into the answer.
            block.as_bytes_mut()[bytes_read..].fill(0);
            let may_contain = block.check(fragment);
            log::warn!(
                "Bloom filter probe read {} of {} bytes at offset {}: {}",
                bytes_read,
                BLOCK_SIZE,
                offset,
                source
            );
            Err(Error::ShortRead { offset, bytes_read, may_contain, source })
        }
    }
}

/// Fill `buf` from `offset`, returning how much arrived and the error that
/// stopped the read, if any.
fn read_full_at<R: ReadAt + ?Sized>(
    source: &R,
    buf: &mut [u8],
    offset: u64,
) -> (usize, Option<io::Error>) {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read_at(&mut buf[filled..], offset + filled as u64) {
            Ok(0) => {
                let eof = io::Error::new(io::ErrorKind::UnexpectedEof, "bloom filter block truncated");
                return (filled, Some(eof));
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return (filled, Some(e)),
        }
    }
    (filled, None)
}
