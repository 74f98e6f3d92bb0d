//! Performance benchmarks for the expectation codec
//!
//! Run with: cargo bench
//!
//! The codec runs once per fixture per session, so these mostly guard
//! against accidental quadratic behavior in the marker scanner.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crucible::expectation::{decode, encode};
use crucible::RunOutcome;

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    group.bench_function("short_text", |b| {
        b.iter(|| decode(black_box("e: 'hello:world'")))
    });

    let long_marker = format!("e: '{}'", "line:".repeat(200));
    group.bench_function("long_text", |b| b.iter(|| decode(black_box(&long_marker))));

    group.bench_function("ignore", |b| b.iter(|| decode(black_box("ignore: flaky on arm64"))));

    group.bench_function("fail_token", |b| b.iter(|| decode(black_box("e: '(fail)'"))));

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    let short = RunOutcome::completed(b"hello\nworld\n".to_vec(), Some(0));
    group.bench_function("short_text", |b| b.iter(|| encode(black_box(&short))));

    let long = RunOutcome::completed("line\n".repeat(200).into_bytes(), Some(0));
    group.bench_function("long_text", |b| b.iter(|| encode(black_box(&long))));

    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode);
criterion_main!(benches);
