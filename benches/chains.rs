use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tableaux::*;

/// `(p0 -> p1) & (p1 -> p2) & ... & p0 & !pn`, unsatisfiable
fn implication_chain(length: usize) -> Formula {
    let letter = |i: usize| Formula::letter(format!("p{}", i));
    let ends = Formula::and(letter(0), Formula::not(letter(length)));
    (0..length).fold(ends, |chain, i| {
        Formula::and(Formula::implies(letter(i), letter(i + 1)), chain)
    })
}

/// `p0 ^ p1 ^ ... ^ pn`, one model per odd subset
fn parity(length: usize) -> Formula {
    (1..=length).fold(Formula::letter("p0"), |parity, i| {
        Formula::xor(parity, Formula::letter(format!("p{}", i)))
    })
}

pub fn chains(c: &mut Criterion) {
    let mut group = c.benchmark_group("chains");
    for length in [4, 8].iter() {
        let formula = implication_chain(*length);
        group.bench_with_input(BenchmarkId::new("semantic", length), &formula, |b, f| {
            b.iter(|| semantic_tableau(f.clone()).is_satisfiable())
        });
        group.bench_with_input(BenchmarkId::new("analytic", length), &formula, |b, f| {
            b.iter(|| analytic_tableau(f.clone()).is_satisfiable())
        });
        group.bench_with_input(BenchmarkId::new("buffered", length), &formula, |b, f| {
            b.iter(|| buffered_tableau(f.clone()).is_satisfiable())
        });
    }
    group.finish();
}

pub fn parity_models(c: &mut Criterion) {
    let formula = parity(5);
    c.bench_function("parity semantic evaluate", |b| {
        b.iter(|| semantic_tableau(formula.clone()).evaluate())
    });
    c.bench_function("parity buffered evaluate", |b| {
        b.iter(|| buffered_tableau(formula.clone()).evaluate())
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(30);
    targets = chains, parity_models
}
criterion_main!(benches);
