//! Reduction of a 64-bit value hash to a block index and an in-block fragment.
//!
//! The high half selects the block with a multiply-shift, the low half is the
//! fragment handed to [`Block::insert`](super::Block::insert) and
//! [`Block::check`](super::Block::check). The same reduction is used by the
//! in-memory filter and the disk-backed probe.

/// Map `hash` to a block in `[0, num_blocks)`.
///
/// Returns 0 when `num_blocks` is 0; callers must not address a block then.
#[inline]
pub fn block_index(hash: u64, num_blocks: u32) -> u32 {
    (((hash >> 32) * u64::from(num_blocks)) >> 32) as u32
}

/// The 32-bit fragment of `hash` used inside a block.
#[inline]
pub fn fragment(hash: u64) -> u32 {
    hash as u32
}
