//! Benchmarks for the iterative exp/ln implementations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use solvere_numbers::{Decimal, Fraction, Number};

fn bench_decimal(c: &mut Criterion) {
    let one = Decimal::from_i64(1);
    let two = Decimal::from_i64(2);

    c.bench_function("decimal_exp_1", |b| {
        b.iter(|| black_box(&one).exp());
    });
    c.bench_function("decimal_ln_2", |b| {
        b.iter(|| black_box(&two).ln());
    });
}

fn bench_fraction(c: &mut Criterion) {
    let one = Fraction::from_i64(1);

    c.bench_function("fraction_exp_1", |b| {
        b.iter(|| black_box(&one).exp());
    });
}

criterion_group!(benches, bench_decimal, bench_fraction);
criterion_main!(benches);
