use std::time::Duration;

use benchgate::{
    RegressionDetector, ThresholdTable,
    bench_utils::{generate_bench_output, scale_ns},
    parse, render,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

const OUTPUT_SEED: u64 = 0xBE7C;
const SAMPLE_SIZE: usize = 20;
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_millis(500);

fn bench_scales() -> &'static [usize] {
    #[cfg(feature = "bench-ci")]
    {
        &[100, 1_000]
    }
    #[cfg(not(feature = "bench-ci"))]
    {
        &[100, 1_000, 10_000]
    }
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for &count in bench_scales() {
        let text = generate_bench_output(count, OUTPUT_SEED + count as u64);
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| parse(&text));
        });
    }
    group.finish();
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    let detector = RegressionDetector::new(ThresholdTable::default());
    for &count in bench_scales() {
        let baseline = parse(&generate_bench_output(count, OUTPUT_SEED + count as u64));
        let current = scale_ns(&baseline, 1.25);
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| detector.detect(&current, &baseline));
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    let detector = RegressionDetector::new(ThresholdTable::default());
    for &count in bench_scales() {
        let baseline = parse(&generate_bench_output(count, OUTPUT_SEED + count as u64));
        let current = scale_ns(&baseline, 1.25);
        let violations = detector.detect(&current, &baseline);
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| render(&current, &baseline, &violations));
        });
    }
    group.finish();
}

criterion_group!(
    name = gate_benches;
    config = Criterion::default();
    targets = bench_parse, bench_detect, bench_render
);
criterion_main!(gate_benches);
