use benchgate::bench_utils::{generate_bench_output, scale_ns};
use benchgate::{MetricKind, RegressionDetector, ThresholdTable, parse};

#[test]
fn test_generator_is_deterministic() {
    assert_eq!(generate_bench_output(50, 7), generate_bench_output(50, 7));
    assert_ne!(generate_bench_output(50, 7), generate_bench_output(50, 8));
}

#[test]
fn test_scaled_copy_regresses_only_beyond_threshold() {
    let baseline = parse(&generate_bench_output(100, 11));
    let detector = RegressionDetector::new(ThresholdTable::default());

    let mild = scale_ns(&baseline, 1.05);
    assert!(detector.detect(&mild, &baseline).is_empty());

    let severe = scale_ns(&baseline, 2.0);
    let time_hits = detector
        .detect(&severe, &baseline)
        .iter()
        .filter(|v| v.kind == MetricKind::ExecutionTime)
        .count();
    assert_eq!(time_hits, baseline.len());
}
