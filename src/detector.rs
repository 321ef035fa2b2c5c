use crate::metrics::{MetricSet, MetricSets};
use crate::thresholds::{MetricKind, ThresholdTable};

/// One metric of one benchmark crossing its threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct Violation {
    pub benchmark: String,
    pub kind: MetricKind,
    /// `current / baseline`. `None` when the baseline denominator is zero.
    pub ratio: Option<f64>,
    pub threshold: f64,
}

impl Violation {
    /// `|ratio - 1| * 100`, or `None` for a zero baseline.
    pub fn percent_change(&self) -> Option<f64> {
        self.ratio.map(|r| (r - 1.0).abs() * 100.0)
    }
}

#[derive(Clone, Debug, Default)]
pub struct RegressionDetector {
    thresholds: ThresholdTable,
}

impl RegressionDetector {
    pub fn new(thresholds: ThresholdTable) -> Self {
        Self { thresholds }
    }

    /// Compares every benchmark present in both collections.
    ///
    /// Output follows the name order of `current`; per benchmark the checks run
    /// execution time, memory, then throughput.
    pub fn detect(&self, current: &MetricSets, baseline: &MetricSets) -> Vec<Violation> {
        let mut violations = Vec::new();
        for cur in current {
            let Some(base) = baseline.get(&cur.name) else {
                continue;
            };
            self.check_pair(cur, base, &mut violations);
        }
        violations
    }

    fn check_pair(&self, cur: &MetricSet, base: &MetricSet, out: &mut Vec<Violation>) {
        if base.ns_per_op == 0 {
            // Neither time nor throughput has a usable denominator.
            out.push(self.violation(cur, MetricKind::ExecutionTime, None));
            if base.bytes_per_op > 0 {
                self.check_ratio(cur, MetricKind::MemoryUsage, base.bytes_per_op, cur.bytes_per_op, out);
            }
            out.push(self.violation(cur, MetricKind::Throughput, None));
            return;
        }

        self.check_ratio(cur, MetricKind::ExecutionTime, base.ns_per_op, cur.ns_per_op, out);
        if base.bytes_per_op > 0 {
            self.check_ratio(cur, MetricKind::MemoryUsage, base.bytes_per_op, cur.bytes_per_op, out);
        }
        let throughput_ratio = cur.ops_per_sec() / base.ops_per_sec();
        if self.thresholds.is_violation(MetricKind::Throughput, throughput_ratio) {
            out.push(self.violation(cur, MetricKind::Throughput, Some(throughput_ratio)));
        }
    }

    fn check_ratio(
        &self,
        cur: &MetricSet,
        kind: MetricKind,
        base_value: u64,
        cur_value: u64,
        out: &mut Vec<Violation>,
    ) {
        let ratio = cur_value as f64 / base_value as f64;
        if self.thresholds.is_violation(kind, ratio) {
            out.push(self.violation(cur, kind, Some(ratio)));
        }
    }

    fn violation(&self, cur: &MetricSet, kind: MetricKind, ratio: Option<f64>) -> Violation {
        Violation {
            benchmark: cur.name.clone(),
            kind,
            ratio,
            threshold: self.thresholds.threshold(kind),
        }
    }
}

/// Shorthand for [`RegressionDetector::detect`].
pub fn detect(current: &MetricSets, baseline: &MetricSets, thresholds: &ThresholdTable) -> Vec<Violation> {
    RegressionDetector::new(*thresholds).detect(current, baseline)
}
