//! Benchmarks for coefficient extraction and single-site gate application
//! across bond dimensions.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qmps::{Gate, MpsChain};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const N_SITES: usize = 32;

fn create_chain(bond_dim: usize) -> MpsChain {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    MpsChain::with_rng(N_SITES, bond_dim, &mut rng).unwrap()
}

fn random_labels(count: usize, seed: u64) -> Vec<Vec<usize>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| (0..N_SITES).map(|_| rng.random_range(0..2)).collect())
        .collect()
}

fn bench_coefficient(c: &mut Criterion) {
    let labels = random_labels(64, 7);

    let mut group = c.benchmark_group("coefficient");
    group.sample_size(20);

    for bond_dim in [2, 8, 32] {
        let chain = create_chain(bond_dim);
        group.bench_with_input(BenchmarkId::from_parameter(bond_dim), &labels, |b, labels| {
            b.iter(|| {
                for l in labels {
                    black_box(chain.coefficient(black_box(l)).unwrap());
                }
            })
        });
    }

    group.finish();
}

fn bench_apply_gate(c: &mut Criterion) {
    let gate = Gate::<f64>::h();

    let mut group = c.benchmark_group("apply_gate");

    for bond_dim in [2, 8, 32, 128] {
        let mut chain = create_chain(bond_dim);
        group.bench_function(BenchmarkId::from_parameter(bond_dim), |b| {
            b.iter(|| chain.apply(black_box(&gate), black_box(N_SITES / 2)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_coefficient, bench_apply_gate);
criterion_main!(benches);
