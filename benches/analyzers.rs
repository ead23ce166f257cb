//! Criterion benchmarks pitting the suffix location strategies against each
//! other on synthetic effect sequences.
//!
//! Run with: cargo bench

use acex::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const LENGTH: usize = 512;

/// Locates a spread of flip positions and returns the total number of effect
/// computations the strategy needed for them.
fn locate_flips(analyzer: Analyzer) -> usize {
    let mut computations = 0;
    for flip in (0..LENGTH).step_by(31) {
        let mut acex = FunctionAcex::new(LENGTH, |index| index > flip);
        let located = analyzer.analyze(&mut acex).unwrap();
        assert_eq!(black_box(located), flip);
        computations += acex.queries();
    }
    computations
}

fn benchmarks(c: &mut Criterion) {
    for analyzer in Analyzer::ALL {
        c.bench_function(analyzer.name(), |b| b.iter(|| black_box(locate_flips(analyzer))));
    }
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
