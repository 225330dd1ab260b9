use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use tableaux::*;

const FORMULAS: usize = 50;

pub fn random(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xdecaf);
    let mut group = c.benchmark_group("random");

    for size in [3, 5].iter() {
        let formulas = (0..FORMULAS)
            .map(|_| Formula::random(&mut rng, *size))
            .collect::<Vec<_>>();

        group.bench_with_input(BenchmarkId::new("semantic", size), &formulas, |b, formulas| {
            b.iter(|| formulas.iter().cloned().map(semantic_tableau).count())
        });
        group.bench_with_input(BenchmarkId::new("analytic", size), &formulas, |b, formulas| {
            b.iter(|| formulas.iter().cloned().map(analytic_tableau).count())
        });
        group.bench_with_input(BenchmarkId::new("buffered", size), &formulas, |b, formulas| {
            b.iter(|| formulas.iter().cloned().map(buffered_tableau).count())
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(30);
    targets = random
}
criterion_main!(benches);
