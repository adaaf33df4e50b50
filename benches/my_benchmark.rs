use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use numtrie_store::Registry;

const ALPHABET: &[u8] = b"0123456789*#";

/// Deterministic pseudo-random digit generator (no `rand` dependency
/// needed for a reproducible benchmark corpus); avoids pulling `rand`
/// into the non-dev dependency graph just for bench data.
fn nth_number(seed: u64, len: usize) -> String {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    let mut s = String::with_capacity(len);
    for _ in 0..len {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let symbol = ALPHABET[(state >> 33) as usize % ALPHABET.len()];
        s.push(symbol as char);
    }
    s
}

fn build_registry(rule_count: u64, source_len: usize, image_len: usize) -> Registry {
    let mut registry = Registry::new();
    for i in 0..rule_count {
        let source = nth_number(i, source_len);
        let image = nth_number(i ^ 0x5bd1e995, image_len);
        registry.add(&source, &image);
    }
    registry
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    for &rule_count in &[1_000u64, 10_000, 100_000] {
        group.throughput(Throughput::Elements(rule_count));
        group.bench_with_input(
            BenchmarkId::from_parameter(rule_count),
            &rule_count,
            |b, &rule_count| {
                b.iter(|| build_registry(rule_count, 9, 9));
            },
        );
    }
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    for &rule_count in &[1_000u64, 10_000, 100_000] {
        let registry = build_registry(rule_count, 9, 9);
        let queries: Vec<String> = (0..1_000).map(|i| nth_number(i, 9)).collect();
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(rule_count),
            &rule_count,
            |b, _| {
                b.iter(|| {
                    for q in &queries {
                        let _ = registry.get(q);
                    }
                });
            },
        );
    }
    group.finish();
}

fn bench_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("reverse");
    for &rule_count in &[1_000u64, 10_000, 100_000] {
        let registry = build_registry(rule_count, 9, 5);
        let queries: Vec<String> = (0..1_000).map(|i| nth_number(i ^ 0x5bd1e995, 5)).collect();
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(rule_count),
            &rule_count,
            |b, _| {
                b.iter(|| {
                    for q in &queries {
                        let _ = registry.reverse(q);
                    }
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_add, bench_get, bench_reverse);
criterion_main!(benches);
