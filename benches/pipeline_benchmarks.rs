#![allow(missing_docs)]
//! Reduction pipeline benchmarks.
//!
//! Measures throughput of the pipeline over an in-memory CSV input at several
//! admission limits, and compares the locked record accumulator with the
//! atomic scalar one.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use prodpeak::{BestRecords, Format, PeakValues, PipelineConfig, ReductionPipeline};
use std::io::Cursor;
use std::sync::Arc;

const RECORDS: usize = 20_000;

/// Build a CSV input with pseudo-random prices and ratings.
fn csv_input(records: usize) -> String {
    (0..records)
        .map(|i| format!("product-{i};{};{}\n", (i * 7919) % 100_003, (i * 31) % 997))
        .collect()
}

fn benchmark_limits(c: &mut Criterion) {
    let input = black_box(csv_input(RECORDS));
    let mut group = c.benchmark_group("best_records_by_limit");

    for limit in [1usize, 64, 100_000] {
        let config = PipelineConfig {
            limit,
            ..PipelineConfig::default()
        };
        let pipeline = ReductionPipeline::new(&config).expect("pipeline");
        group.bench_with_input(BenchmarkId::from_parameter(limit), &input, |b, input| {
            b.iter(|| {
                let best = Arc::new(BestRecords::new());
                pipeline
                    .run(Cursor::new(input.as_bytes()), Format::Csv, &best)
                    .expect("run")
            });
        });
    }
    group.finish();
}

fn benchmark_scalar_accumulator(c: &mut Criterion) {
    let input = black_box(csv_input(RECORDS));
    let pipeline = ReductionPipeline::new(&PipelineConfig::default()).expect("pipeline");

    c.bench_function("peak_values_default_limit", |b| {
        b.iter(|| {
            let peaks = Arc::new(PeakValues::new());
            pipeline
                .run(Cursor::new(input.as_bytes()), Format::Csv, &peaks)
                .expect("run")
        });
    });
}

criterion_group!(benches, benchmark_limits, benchmark_scalar_accumulator);
criterion_main!(benches);
