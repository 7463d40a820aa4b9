//! Example demonstrating split-block Bloom filter usage
//!
//! Builds a filter for a column of values, stores it in a file after a page
//! header, and answers lookups by reading single blocks from the file.

use splitbloom::filter::{Filter, MutableFilter, SplitBlockFilter};
use splitbloom::probe::RemoteFilter;
use splitbloom::{BlockPool, Options};
use std::collections::hash_map::DefaultHasher;
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::Write;

const PAGE_HEADER: &[u8] = b"BLOOMHDR";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== splitbloom Example ===\n");

    let values: Vec<String> = (0..10_000).map(|i| format!("user:{}", i)).collect();

    // Example 1: Build a filter in memory
    let filter = example_build_filter(&values)?;

    // Example 2: Probe the filter from disk
    example_probe_from_disk(&filter, &values)?;

    Ok(())
}

/// Values are hashed by the caller; any good 64-bit hash works.
fn hash_value(value: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Example 1: Using the filter directly
fn example_build_filter(values: &[String]) -> anyhow::Result<SplitBlockFilter> {
    println!("--- Example 1: Build a filter ---");

    let options = Options::default();
    let mut filter = SplitBlockFilter::for_values(values.len() as u64, &options)?;

    let hashes: Vec<u64> = values.iter().map(|v| hash_value(v)).collect();
    filter.insert_bulk(&hashes);

    println!("Inserted {} values", values.len());
    println!(
        "Filter size: {} bytes ({} blocks)",
        filter.as_bytes().len(),
        filter.num_blocks()
    );
    println!(
        "Expected false positive rate: {:.4}%",
        filter.estimated_false_positive_rate(values.len() as u64) * 100.0
    );

    println!("\nTesting membership:");
    for value in ["user:1", "user:9999", "user:10000", "admin"] {
        println!("  {} may exist? {}", value, filter.check(hash_value(value)));
    }
    println!();

    Ok(filter)
}

/// Example 2: Probing a stored filter one block at a time
fn example_probe_from_disk(filter: &SplitBlockFilter, values: &[String]) -> anyhow::Result<()> {
    println!("--- Example 2: Probe from disk ---");

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("column.bloom");

    let mut file = File::create(&path)?;
    file.write_all(PAGE_HEADER)?;
    filter.write_to(&mut file)?;
    file.sync_all()?;

    let file = File::open(&path)?;
    let remote = RemoteFilter::at_offset(file, PAGE_HEADER.len() as u64, filter.as_bytes().len() as u64)?;
    let pool = BlockPool::new(4);

    let mut found = 0;
    for value in values {
        if remote.check_with(&pool, hash_value(value))? {
            found += 1;
        }
    }
    println!("Found {}/{} stored values", found, values.len());

    let misses = 100_000;
    let mut false_positives = 0;
    for i in 0..misses {
        if remote.check_with(&pool, hash_value(&format!("missing:{}", i)))? {
            false_positives += 1;
        }
    }
    println!("False positives: {}/{}", false_positives, misses);

    let stats = pool.stats();
    println!("Pool: {} acquisitions, {} allocations", stats.acquired, stats.allocated);

    Ok(())
}
