//! Markdown rendering of a gate run.

use crate::detector::Violation;
use crate::metrics::MetricSets;
use crate::thresholds::MetricKind;

pub const TITLE: &str = "# Performance Report";
pub const NO_REGRESSIONS: &str = "✅ No performance regressions detected!";

/// Renders the summary and the ns/op comparison table. Pure.
pub fn render(current: &MetricSets, baseline: &MetricSets, violations: &[Violation]) -> String {
    let mut lines = vec![format!("{TITLE}\n")];

    if violations.is_empty() {
        lines.push(format!("{NO_REGRESSIONS}\n"));
    } else {
        lines.push(format!(
            "❌ {} performance regressions detected:\n",
            violations.len()
        ));
        lines.extend(violations.iter().map(violation_line));
    }

    lines.push("\n## Benchmark Comparison\n".to_string());
    lines.push("| Benchmark | Current (ns/op) | Baseline (ns/op) | Change |".to_string());
    lines.push("|-----------|-----------------|------------------|--------|".to_string());

    for set in current {
        let base_ns = baseline.get(&set.name).map(|b| b.ns_per_op).unwrap_or(0);
        lines.push(format!(
            "| {} | {} | {} | {} |",
            set.name,
            group_thousands(set.ns_per_op),
            group_thousands(base_ns),
            change_cell(set.ns_per_op, base_ns)
        ));
    }

    lines.join("\n")
}

fn violation_line(v: &Violation) -> String {
    let change = match v.percent_change() {
        Some(pct) => {
            let word = match v.kind {
                MetricKind::Throughput => "slower",
                MetricKind::ExecutionTime | MetricKind::MemoryUsage => "increase",
            };
            format!("{pct:.1}% {word}")
        }
        None => "baseline is zero".to_string(),
    };
    format!(
        "- **{}** ({}): {} (threshold: {})",
        v.benchmark, v.kind, change, v.threshold
    )
}

fn change_cell(current_ns: u64, base_ns: u64) -> String {
    if base_ns == 0 {
        return "NEW".to_string();
    }
    let pct = (current_ns as f64 / base_ns as f64 - 1.0) * 100.0;
    format!("{pct:+.1}%")
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
