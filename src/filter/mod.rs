//! Split-block Bloom filters.
//!
//! Values enter a filter as 64-bit hashes. The high half of a hash picks one
//! 32-byte [`Block`]; the low half sets or tests one bit in each of the
//! block's eight words. The byte layout matches Parquet bloom filter pages.
//!
//! Probing only needs [`Filter`]; building needs [`MutableFilter`].

pub mod block;
pub mod hash;
mod shared;
mod sizing;
mod split_block;

pub use block::{Block, BLOCK_SIZE, SALT, WORDS_PER_BLOCK};
pub use shared::SharedFilter;
pub use sizing::{blocks_needed, byte_count, false_positive_rate};
pub(crate) use sizing::block_count_of;
pub use split_block::SplitBlockFilter;

/// Read-only membership test.
pub trait Filter {
    /// Check if a hash may have been inserted (can have false positives).
    fn check(&self, hash: u64) -> bool;
}

/// A filter that can be built.
pub trait MutableFilter: Filter {
    /// Clear every bit.
    fn reset(&mut self);

    /// Add a hash to the filter.
    fn insert(&mut self, hash: u64);

    /// Add all hashes. Same result as inserting them one at a time, in any order.
    fn insert_bulk(&mut self, hashes: &[u64]) {
        for &hash in hashes {
            self.insert(hash);
        }
    }

    /// The serialized representation of the filter.
    fn bytes(&self) -> &[u8];
}

impl<F: Filter + ?Sized> Filter for &F {
    fn check(&self, hash: u64) -> bool {
        (**self).check(hash)
    }
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn check(&self, hash: u64) -> bool {
        (**self).check(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_hits(filter: &dyn Filter, hashes: &[u64]) -> usize {
        hashes.iter().filter(|&&h| filter.check(h)).count()
    }

    #[test]
    fn test_filter_trait_object() {
        let mut filter = SplitBlockFilter::new(4);
        filter.insert_bulk(&[1, 2, 3]);

        assert_eq!(count_hits(&filter, &[1, 2, 3]), 3);

        let boxed: Box<dyn Filter> = Box::new(filter);
        assert!(boxed.check(2));
    }

    #[test]
    fn test_default_insert_bulk() {
        struct Recorder(Vec<u64>);

        impl Filter for Recorder {
            fn check(&self, hash: u64) -> bool {
                self.0.contains(&hash)
            }
        }

        impl MutableFilter for Recorder {
            fn reset(&mut self) {
                self.0.clear();
            }
            fn insert(&mut self, hash: u64) {
                self.0.push(hash);
            }
            fn bytes(&self) -> &[u8] {
                &[]
            }
        }

        let mut recorder = Recorder(Vec::new());
        recorder.insert_bulk(&[3, 1, 2]);
        assert_eq!(recorder.0, vec![3, 1, 2]);
        assert!(recorder.check(1));
    }
}
