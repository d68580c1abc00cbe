//! SM2 point and integer arithmetic benchmarks

use core::hint::black_box;
use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use gm_sm2::{AffinePoint, BigInteger, CurveParams};
use hex_literal::hex;

fn test_scalar_x() -> BigInteger {
    BigInteger::from_bytes(&hex!(
        "bb488aef416a41d7680d1cf01d70f59b60d7f5f77e30e78b8bf9d2d882f156a6"
    ))
}

fn test_scalar_y() -> BigInteger {
    BigInteger::from_bytes(&hex!(
        "67e2f68071ed8281e8aed6bcf1c5207c5e633722d920afd6ae22d06eeb8035e3"
    ))
}

fn bench_point_add<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let p = AffinePoint::generator();
    let q = p.double().unwrap();
    group.bench_function("point add", |b| {
        b.iter(|| black_box(&p).add_point(black_box(&q)))
    });
    group.bench_function("point double", |b| b.iter(|| black_box(&p).double()));
}

fn bench_point_mul<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let p = AffinePoint::mul_by_generator(&test_scalar_y()).unwrap();
    let s = test_scalar_x();
    group.bench_function("point-scalar mul", |b| {
        b.iter(|| black_box(&p).mul_scalar(black_box(&s)))
    });
    group.bench_function("mul_by_generator", |b| {
        b.iter(|| AffinePoint::mul_by_generator(black_box(&s)))
    });
}

fn bench_high_level(c: &mut Criterion) {
    let mut group = c.benchmark_group("high-level operations");
    bench_point_add(&mut group);
    bench_point_mul(&mut group);
    group.finish();
}

fn bench_mod_inverse<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let p = &CurveParams::sm2().p;
    let x = test_scalar_x();
    group.bench_function("mod_inverse", |b| {
        b.iter(|| black_box(&x).mod_inverse(black_box(p)))
    });
}

fn bench_mod_mul<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let p = &CurveParams::sm2().p;
    let x = test_scalar_x();
    let y = test_scalar_y();
    group.bench_function("mul + modulo", |b| {
        b.iter(|| (black_box(&x) * black_box(&y)).modulo(black_box(p)))
    });
}

fn bench_bigint(c: &mut Criterion) {
    let mut group = c.benchmark_group("BigInteger operations");
    bench_mod_inverse(&mut group);
    bench_mod_mul(&mut group);
    group.finish();
}

criterion_group!(benches, bench_high_level, bench_bigint);
criterion_main!(benches);
