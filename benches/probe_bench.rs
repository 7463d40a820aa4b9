// Disk-backed probe benchmarks for splitbloom

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use splitbloom::filter::{MutableFilter, SplitBlockFilter};
use splitbloom::pool::BlockPool;
use splitbloom::probe::{check_split_block, RemoteFilter};
use std::fs::File;
use std::hint::black_box;
use std::io::Write;
use tempfile::NamedTempFile;

fn random_hashes(seed: u64, count: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.random::<u64>()).collect()
}

fn build_filter(size: usize) -> (SplitBlockFilter, Vec<u64>) {
    let inserted = random_hashes(1, size);
    let mut filter = SplitBlockFilter::with_capacity(size as u64, 10);
    filter.insert_bulk(&inserted);
    (filter, inserted)
}

fn benchmark_probe_memory(c: &mut Criterion) {
    let mut group = c.benchmark_group("probe_memory");

    let (filter, inserted) = build_filter(100_000);
    let bytes = filter.into_bytes();
    let len = bytes.len() as u64;
    let probes = &inserted[..10_000];

    group.throughput(Throughput::Elements(probes.len() as u64));
    group.bench_function("global_pool", |b| {
        b.iter(|| {
            for &h in probes {
                black_box(check_split_block(&bytes, len, h).unwrap());
            }
        });
    });

    let pool = BlockPool::new(16);
    let remote = RemoteFilter::new(&bytes, len).unwrap();
    group.bench_function("local_pool", |b| {
        b.iter(|| {
            for &h in probes {
                black_box(remote.check_with(&pool, h).unwrap());
            }
        });
    });

    group.finish();
}

fn benchmark_probe_file(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut group = c.benchmark_group("probe_file");

    let (filter, inserted) = build_filter(100_000);
    let mut temp_file = NamedTempFile::new().unwrap();
    filter.write_to(&mut temp_file).unwrap();
    temp_file.flush().unwrap();

    let file = File::open(temp_file.path()).unwrap();
    let remote = RemoteFilter::new(file, filter.as_bytes().len() as u64).unwrap();
    let probes = &inserted[..1_000];

    group.throughput(Throughput::Elements(probes.len() as u64));
    group.bench_function("positional_read", |b| {
        b.iter(|| {
            for &h in probes {
                black_box(remote.check(h).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_probe_memory, benchmark_probe_file);
criterion_main!(benches);
