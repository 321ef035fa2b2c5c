//! Extraction of `go test -bench` style result lines.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::metrics::{MetricSet, MetricSets};

const BENCH_LINE: &str = r"Benchmark(\w+)-\d+\s+(\d+)\s+(\d+)\s+ns/op\s+(\d+)\s+B/op\s+(\d+)\s+allocs/op";

fn bench_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(BENCH_LINE).expect("benchmark line pattern"))
}

/// Scans `text` for every benchmark result and collects them by name.
///
/// Matches are not anchored to line boundaries, so log noise around a result
/// is ignored. A later result for the same benchmark replaces the earlier one.
/// Results reporting `0 ns/op`, or integers that do not fit in `u64`, are
/// skipped.
pub fn parse(text: &str) -> MetricSets {
    let mut sets = MetricSets::new();
    for caps in bench_line().captures_iter(text) {
        let name = &caps[1];
        let fields = (
            caps[2].parse::<u64>(),
            caps[3].parse::<u64>(),
            caps[4].parse::<u64>(),
            caps[5].parse::<u64>(),
        );
        let (Ok(iterations), Ok(ns_per_op), Ok(bytes_per_op), Ok(allocs_per_op)) = fields else {
            debug!(benchmark = name, "skipping result with out-of-range value");
            continue;
        };
        if ns_per_op == 0 {
            debug!(benchmark = name, "skipping result with zero ns/op");
            continue;
        }
        if let Some(previous) = sets.insert(MetricSet::new(
            name,
            iterations,
            ns_per_op,
            bytes_per_op,
            allocs_per_op,
        )) {
            debug!(benchmark = name, replaced_ns = previous.ns_per_op, "duplicate result");
        }
    }
    sets
}

#[cfg(test)]
mod tests {
    use super::parse;

    #[test]
    fn test_parse_single_line() {
        let sets = parse("BenchmarkFoo-8 1000 100 ns/op 50 B/op 2 allocs/op");
        let foo = sets.get("Foo").expect("Foo");
        assert_eq!(foo.iterations, 1000);
        assert_eq!(foo.ns_per_op, 100);
        assert_eq!(foo.bytes_per_op, 50);
        assert_eq!(foo.allocs_per_op, 2);
    }

    #[test]
    fn test_parse_skips_zero_ns() {
        let sets = parse("BenchmarkZero-4 10 0 ns/op 0 B/op 0 allocs/op");
        assert!(sets.is_empty());
    }

    #[test]
    fn test_parse_skips_overflowing_values() {
        let sets = parse("BenchmarkHuge-4 99999999999999999999999 10 ns/op 0 B/op 0 allocs/op");
        assert!(sets.is_empty());
    }
}
