// ============================================================================
// BBP Pi Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Term Generation - One term per strategy at growing indices
// 2. Full Runs - Summation plus extraction per strategy
// 3. Reduction Order - Arrival vs index-ordered accumulation
// ============================================================================

use bbp_pi::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

// ============================================================================
// Term Generation Benchmarks
// Recompute pays O(i) multiplications per term, incremental pays none
// ============================================================================

fn benchmark_term_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("term_generation");

    let params = derive_parameters(512);
    let ctx = PrecisionContext::new(params.precision_bits).unwrap();
    let recompute = RecomputeTerms::new(ctx.clone());
    let incremental = IncrementalTerms::new(ctx, params.term_count).unwrap();
    let exact = ExactTerms::new();

    for index in [1usize, 32, 128].iter() {
        group.bench_with_input(BenchmarkId::new("recompute", index), index, |b, &index| {
            b.iter(|| black_box(recompute.term(index).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("incremental", index), index, |b, &index| {
            b.iter(|| black_box(incremental.term(index).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("exact-rational", index), index, |b, &index| {
            b.iter(|| black_box(exact.term(index).unwrap()));
        });
    }

    group.finish();
}

// ============================================================================
// Full Run Benchmarks
// Fan-out, fan-in and extraction end to end
// ============================================================================

fn benchmark_full_runs(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_run");
    group.sample_size(20);

    for output_bits in [64u32, 512].iter() {
        for strategy in TermStrategy::ALL {
            let computer =
                create_from_config(ComputeConfig::new(*output_bits, strategy), Arc::new(NoOpEventHandler))
                    .unwrap();

            group.bench_with_input(
                BenchmarkId::new(strategy.name(), output_bits),
                &computer,
                |b, computer| {
                    b.iter(|| black_box(computer.run().unwrap()));
                },
            );
        }
    }

    group.finish();
}

// ============================================================================
// Reduction Order Benchmarks
// ============================================================================

fn benchmark_reduction_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduction_order");
    group.sample_size(20);

    let params = derive_parameters(512);
    let ctx = PrecisionContext::new(params.precision_bits).unwrap();
    let incremental = IncrementalTerms::new(ctx, params.term_count).unwrap();

    for order in [ReductionOrder::Arrival, ReductionOrder::ByIndex] {
        let engine = SummationEngine::new(Arc::new(NoOpEventHandler)).with_reduction_order(order);
        group.bench_function(format!("{:?}", order), |b| {
            b.iter(|| black_box(engine.sum(params.term_count, &incremental).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_term_generation,
    benchmark_full_runs,
    benchmark_reduction_order,
);
criterion_main!(benches);
