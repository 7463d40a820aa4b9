//! A filter that several threads can build through a shared reference.

use super::{Filter, MutableFilter, SplitBlockFilter};
use crate::error::Result;
use parking_lot::RwLock;

/// A [`SplitBlockFilter`] behind a read-write lock.
///
/// Inserts take the write lock and checks take the read lock, so the filter
/// can be shared with `Arc<SharedFilter>`.
///
/// # Example
/// ```
/// use splitbloom::filter::{Filter, SharedFilter, SplitBlockFilter};
/// use std::sync::Arc;
///
/// let filter = Arc::new(SharedFilter::new(SplitBlockFilter::new(16)));
/// let handles: Vec<_> = (0..4u64)
///     .map(|t| {
///         let filter = Arc::clone(&filter);
///         std::thread::spawn(move || filter.insert(t << 40 | t))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert!(filter.check(3 << 40 | 3));
/// ```
#[derive(Debug)]
pub struct SharedFilter {
    inner: RwLock<SplitBlockFilter>,
}

impl SharedFilter {
    /// Share an existing filter.
    pub fn new(filter: SplitBlockFilter) -> Self {
        Self { inner: RwLock::new(filter) }
    }

    /// Add a hash.
    pub fn insert(&self, hash: u64) {
        self.inner.write().insert(hash);
    }

    /// Add all hashes under a single lock acquisition.
    pub fn insert_bulk(&self, hashes: &[u64]) {
        self.inner.write().insert_bulk(hashes);
    }

    /// Clear the filter.
    pub fn reset(&self) {
        self.inner.write().reset();
    }

    /// Merge a privately built filter of the same size.
    pub fn union(&self, other: &SplitBlockFilter) -> Result<()> {
        self.inner.write().union(other)
    }

    /// Number of blocks.
    pub fn num_blocks(&self) -> usize {
        self.inner.read().num_blocks()
    }

    /// Copy the current byte image.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner.read().as_bytes().to_vec()
    }

    /// Take the filter back.
    pub fn into_inner(self) -> SplitBlockFilter {
        self.inner.into_inner()
    }
}

impl Filter for SharedFilter {
    fn check(&self, hash: u64) -> bool {
        self.inner.read().check(hash)
    }
}
