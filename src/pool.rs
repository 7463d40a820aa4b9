//! Pool of scratch blocks for disk-backed probes.
//!
//! A probe borrows one [`Block`] to receive its ranged read. Blocks are handed
//! out as [`PooledBlock`] guards that return themselves to the pool when
//! dropped, on every exit path.

use crate::config::Options;
use crate::filter::Block;
use crossbeam::queue::ArrayQueue;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

/// Statistics for pool usage monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Total number of acquisitions
    pub acquired: u64,
    /// Acquisitions that had to allocate a new block
    pub allocated: u64,
    /// Blocks returned to the pool
    pub released: u64,
    /// Blocks dropped because the pool was full
    pub discarded: u64,
}

impl PoolStats {
    /// Fraction of acquisitions served by a pooled block (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        if self.acquired == 0 {
            0.0
        } else {
            (self.acquired - self.allocated) as f64 / self.acquired as f64
        }
    }
}

/// Thread-safe free list of scratch blocks.
///
/// Acquisition never blocks: it pops an idle block or allocates a new one.
/// At most `capacity` idle blocks are retained.
///
/// # Example
/// ```
/// use splitbloom::pool::BlockPool;
///
/// let pool = BlockPool::new(4);
/// {
///     let mut block = pool.acquire();
///     block.insert(7);
/// }
/// assert_eq!(pool.idle(), 1);
/// ```
#[derive(Debug)]
pub struct BlockPool {
    free: ArrayQueue<Block>,
    acquired: AtomicU64,
    allocated: AtomicU64,
    released: AtomicU64,
    discarded: AtomicU64,
}

impl BlockPool {
    /// Create a pool retaining at most `capacity` idle blocks.
    pub fn new(capacity: usize) -> Self {
        Self {
            free: ArrayQueue::new(capacity.max(1)),
            acquired: AtomicU64::new(0),
            allocated: AtomicU64::new(0),
            released: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
        }
    }

    /// Create a pool from `options`.
    pub fn with_options(options: &Options) -> crate::Result<Self> {
        options.validate()?;
        Ok(Self::new(options.pool_capacity))
    }

    /// The process-wide pool used by [`check_split_block`](crate::probe::check_split_block).
    pub fn global() -> &'static BlockPool {
        static GLOBAL: OnceLock<BlockPool> = OnceLock::new();
        GLOBAL.get_or_init(|| BlockPool::new(crate::config::DEFAULT_POOL_CAPACITY))
    }

    /// Borrow a scratch block. Its contents are unspecified.
    pub fn acquire(&self) -> PooledBlock<'_> {
        self.acquired.fetch_add(1, Ordering::Relaxed);
        let block = match self.free.pop() {
            Some(block) => block,
            None => {
                self.allocated.fetch_add(1, Ordering::Relaxed);
                log::debug!("Block pool empty, allocating scratch block");
                Block::new()
            }
        };
        PooledBlock { block, pool: self }
    }

    fn release(&self, block: Block) {
        if self.free.push(block).is_ok() {
            self.released.fetch_add(1, Ordering::Relaxed);
        } else {
            self.discarded.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Number of idle blocks currently held.
    pub fn idle(&self) -> usize {
        self.free.len()
    }

    /// Maximum number of idle blocks held.
    pub fn capacity(&self) -> usize {
        self.free.capacity()
    }

    /// Snapshot of the pool's counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            acquired: self.acquired.load(Ordering::Relaxed),
            allocated: self.allocated.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
        }
    }
}

/// A scratch block on loan from a [`BlockPool`].
#[derive(Debug)]
pub struct PooledBlock<'a> {
    block: Block,
    pool: &'a BlockPool,
}

impl Deref for PooledBlock<'_> {
    type Target = Block;

    fn deref(&self) -> &Block {
        &self.block
    }
}

impl DerefMut for PooledBlock<'_> {
    fn deref_mut(&mut self) -> &mut Block {
        &mut self.block
    }
}

impl Drop for PooledBlock<'_> {
    fn drop(&mut self) {
        self.pool.release(self.block);
    }
}
