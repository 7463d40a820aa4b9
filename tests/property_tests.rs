//! Property tests for split-block filters

use proptest::prelude::*;
use splitbloom::filter::{hash, Filter, MutableFilter, SplitBlockFilter};
use splitbloom::probe::check_split_block;
use splitbloom::blocks_needed;

proptest! {
    #[test]
    fn prop_inserted_hashes_are_found(
        num_blocks in 1u32..64,
        hashes in prop::collection::vec(any::<u64>(), 0..500),
    ) {
        let mut filter = SplitBlockFilter::new(num_blocks);
        filter.insert_bulk(&hashes);
        for &h in &hashes {
            prop_assert!(filter.check(h));
        }
    }

    #[test]
    fn prop_bulk_insert_is_order_independent(
        num_blocks in 1u32..32,
        hashes in prop::collection::vec(any::<u64>(), 0..300),
        rotation in 0usize..300,
    ) {
        let mut bulk = SplitBlockFilter::new(num_blocks);
        bulk.insert_bulk(&hashes);

        let mut permuted = hashes.clone();
        if !permuted.is_empty() {
            let k = rotation % permuted.len();
            permuted.rotate_left(k);
        }
        permuted.reverse();

        let mut sequential = SplitBlockFilter::new(num_blocks);
        for &h in &permuted {
            sequential.insert(h);
        }

        prop_assert_eq!(bulk.as_bytes(), sequential.as_bytes());
    }

    #[test]
    fn prop_wrap_round_trip(
        num_blocks in 0u32..32,
        inserted in prop::collection::vec(any::<u64>(), 0..200),
        probes in prop::collection::vec(any::<u64>(), 0..200),
    ) {
        let mut filter = SplitBlockFilter::new(num_blocks);
        filter.insert_bulk(&inserted);

        let loaded = SplitBlockFilter::wrap(filter.as_bytes()).unwrap();
        for &h in inserted.iter().chain(probes.iter()) {
            prop_assert_eq!(loaded.check(h), filter.check(h));
        }
    }

    #[test]
    fn prop_disk_probe_agrees_with_memory(
        num_blocks in 1u32..16,
        inserted in prop::collection::vec(any::<u64>(), 1..100),
        probes in prop::collection::vec(any::<u64>(), 0..100),
    ) {
        let mut filter = SplitBlockFilter::new(num_blocks);
        filter.insert_bulk(&inserted);
        let bytes = filter.as_bytes();
        let len = bytes.len() as u64;

        for &h in inserted.iter().chain(probes.iter()) {
            prop_assert_eq!(check_split_block(bytes, len, h).unwrap(), filter.check(h));
        }
    }

    #[test]
    fn prop_block_index_in_range(h in any::<u64>(), n in 1u32..) {
        let index = hash::block_index(h, n);
        prop_assert!(index < n);
        prop_assert_eq!(index, hash::block_index(h, n));
    }

    #[test]
    fn prop_blocks_needed_monotonic(
        v in 0u64..10_000_000,
        dv in 0u64..10_000,
        p in 0u32..64,
        dp in 0u32..8,
    ) {
        prop_assert!(blocks_needed(v + dv, p) >= blocks_needed(v, p));
        prop_assert!(blocks_needed(v, p + dp) >= blocks_needed(v, p));
        prop_assert_eq!(blocks_needed(0, p), 0);
    }

    #[test]
    fn prop_union_matches_combined_inserts(
        left in prop::collection::vec(any::<u64>(), 0..100),
        right in prop::collection::vec(any::<u64>(), 0..100),
    ) {
        let mut a = SplitBlockFilter::new(8);
        a.insert_bulk(&left);
        let mut b = SplitBlockFilter::new(8);
        b.insert_bulk(&right);

        let mut combined = SplitBlockFilter::new(8);
        combined.insert_bulk(&left);
        combined.insert_bulk(&right);

        a.union(&b).unwrap();
        prop_assert_eq!(a, combined);
    }
}

#[test]
fn test_wrap_rejects_every_misaligned_length() {
    for len in 0..256usize {
        let result = SplitBlockFilter::wrap(vec![0u8; len]);
        assert_eq!(result.is_ok(), len % 32 == 0, "length {}", len);
    }
}
