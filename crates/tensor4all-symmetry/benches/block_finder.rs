use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tensor4all_symmetry::{
    compute_num_nonzero, find_diagonal_sparse_blocks_with_options, reduce_charges,
    BlockFinderOptions, ChargeArray, U1Charge,
};

/// Random U(1) legs of dimension `dim` with charges in `-spread..=spread`.
fn random_legs(
    num_legs: usize,
    dim: usize,
    spread: i64,
    seed: u64,
) -> (Vec<ChargeArray<U1Charge>>, Vec<bool>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let charges = (0..num_legs)
        .map(|_| (0..dim).map(|_| U1Charge(rng.random_range(-spread..=spread))).collect())
        .collect();
    let flows = (0..num_legs).map(|n| n % 2 == 0).collect();
    (charges, flows)
}

fn bench_find_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_diagonal_sparse_blocks");

    for &num_legs in &[4, 6, 8] {
        let (charges, flows) = random_legs(num_legs, 6, 2, 42);
        let partition = num_legs / 2;
        for (name, opts) in [
            ("mask_scan", BlockFinderOptions::mask_scan()),
            ("scatter", BlockFinderOptions::scatter()),
        ] {
            group.bench_with_input(BenchmarkId::new(name, num_legs), &num_legs, |b, _| {
                b.iter(|| {
                    find_diagonal_sparse_blocks_with_options(&charges, &flows, partition, &opts)
                        .unwrap()
                });
            });
        }
    }

    group.finish();
}

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce_charges");

    for &num_legs in &[4, 6, 8] {
        let (charges, flows) = random_legs(num_legs, 6, 2, 7);
        let targets = [U1Charge(0)];
        group.bench_with_input(BenchmarkId::new("reduce", num_legs), &num_legs, |b, _| {
            b.iter(|| reduce_charges(&charges, &flows, &targets).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("num_nonzero", num_legs), &num_legs, |b, _| {
            b.iter(|| compute_num_nonzero(&charges, &flows).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find_blocks, bench_reduce);
criterion_main!(benches);
