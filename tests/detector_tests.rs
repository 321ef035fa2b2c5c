use benchgate::{MetricKind, MetricSet, MetricSets, RegressionDetector, ThresholdTable, detect};

fn sets(entries: &[(&str, u64, u64)]) -> MetricSets {
    entries
        .iter()
        .map(|(name, ns, bytes)| MetricSet::new(*name, 1000, *ns, *bytes, 2))
        .collect()
}

fn detector() -> RegressionDetector {
    RegressionDetector::new(ThresholdTable::default())
}

#[test]
fn test_unchanged_metrics_pass() {
    let current = sets(&[("Foo", 100, 50)]);
    let baseline = sets(&[("Foo", 100, 50)]);
    assert!(detector().detect(&current, &baseline).is_empty());
}

#[test]
fn test_slower_run_flags_execution_time() {
    let current = sets(&[("Foo", 130, 50)]);
    let baseline = sets(&[("Foo", 100, 50)]);
    let violations = detector().detect(&current, &baseline);
    let time: Vec<_> = violations
        .iter()
        .filter(|v| v.kind == MetricKind::ExecutionTime)
        .collect();
    assert_eq!(time.len(), 1);
    assert_eq!(time[0].benchmark, "Foo");
    assert_eq!(time[0].ratio, Some(1.3));
    assert_eq!(time[0].threshold, 1.2);
}

#[test]
fn test_ratio_at_threshold_is_not_a_violation() {
    let current = sets(&[("Foo", 120, 50)]);
    let baseline = sets(&[("Foo", 100, 50)]);
    let violations = detector().detect(&current, &baseline);
    assert!(violations.iter().all(|v| v.kind != MetricKind::ExecutionTime));
}

#[test]
fn test_large_slowdown_also_flags_throughput() {
    let current = sets(&[("Foo", 200, 50)]);
    let baseline = sets(&[("Foo", 100, 50)]);
    let violations = detector().detect(&current, &baseline);
    let kinds: Vec<MetricKind> = violations.iter().map(|v| v.kind).collect();
    assert_eq!(kinds, vec![MetricKind::ExecutionTime, MetricKind::Throughput]);
    assert_eq!(violations[1].ratio, Some(0.5));
}

#[test]
fn test_memory_growth_is_flagged() {
    let current = sets(&[("Foo", 100, 60)]);
    let baseline = sets(&[("Foo", 100, 50)]);
    let violations = detector().detect(&current, &baseline);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, MetricKind::MemoryUsage);
    assert_eq!(violations[0].ratio, Some(1.2));
}

#[test]
fn test_zero_byte_baseline_skips_memory() {
    let current = sets(&[("Foo", 100, 1_000_000)]);
    let baseline = sets(&[("Foo", 100, 0)]);
    assert!(detector().detect(&current, &baseline).is_empty());
}

#[test]
fn test_new_benchmark_never_violates() {
    let current = sets(&[("Brand", 10_000, 10_000)]);
    let baseline = sets(&[("Foo", 1, 1)]);
    assert!(detector().detect(&current, &baseline).is_empty());
}

#[test]
fn test_zero_ns_baseline_is_an_automatic_violation() {
    let current = sets(&[("Foo", 100, 50)]);
    let baseline = sets(&[("Foo", 0, 50)]);
    let violations = detector().detect(&current, &baseline);
    let kinds: Vec<MetricKind> = violations.iter().map(|v| v.kind).collect();
    assert_eq!(kinds, vec![MetricKind::ExecutionTime, MetricKind::Throughput]);
    assert!(violations.iter().all(|v| v.ratio.is_none()));
}

#[test]
fn test_all_three_checks_in_order() {
    let current = sets(&[("Foo", 300, 100)]);
    let baseline = sets(&[("Foo", 100, 50)]);
    let kinds: Vec<MetricKind> = detector()
        .detect(&current, &baseline)
        .iter()
        .map(|v| v.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            MetricKind::ExecutionTime,
            MetricKind::MemoryUsage,
            MetricKind::Throughput
        ]
    );
}

#[test]
fn test_violations_follow_name_order() {
    let current = sets(&[("Zeta", 200, 0), ("Alpha", 200, 0)]);
    let baseline = sets(&[("Zeta", 100, 0), ("Alpha", 100, 0)]);
    let names: Vec<String> = detector()
        .detect(&current, &baseline)
        .into_iter()
        .map(|v| v.benchmark)
        .collect();
    assert_eq!(names, vec!["Alpha", "Alpha", "Zeta", "Zeta"]);
}

#[test]
fn test_custom_thresholds_are_honored() {
    let thresholds = ThresholdTable::new(1.05, 1.15, 0.5).expect("thresholds");
    let current = sets(&[("Foo", 110, 50)]);
    let baseline = sets(&[("Foo", 100, 50)]);
    let violations = detect(&current, &baseline, &thresholds);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].threshold, 1.05);
}
