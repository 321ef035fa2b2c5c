use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::metrics::{MetricSet, MetricSets};

const NOISE: &[&str] = &[
    "goos: linux",
    "goarch: amd64",
    "pkg: example.com/service/internal/store",
    "cpu: Intel(R) Xeon(R) CPU @ 2.20GHz",
    "PASS",
];

/// Synthetic `go test -bench` output with `count` results and interleaved
/// noise lines. Same seed, same text.
pub fn generate_bench_output(count: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut lines = Vec::with_capacity(count + count / 4 + NOISE.len());
    lines.extend(NOISE.iter().take(4).map(|s| s.to_string()));
    for idx in 0..count {
        let iterations: u64 = rng.gen_range(1_000..5_000_000);
        let ns: u64 = rng.gen_range(10..2_000_000);
        let bytes: u64 = if rng.gen_bool(0.2) { 0 } else { rng.gen_range(8..65_536) };
        let allocs: u64 = rng.gen_range(0..256);
        let procs = [1, 4, 8, 16][idx % 4];
        lines.push(format!(
            "Benchmark{}-{procs}\t{iterations}\t{ns} ns/op\t{bytes} B/op\t{allocs} allocs/op",
            bench_name(idx)
        ));
        if rng.gen_bool(0.25) {
            lines.push(String::new());
        }
    }
    lines.push(NOISE[4].to_string());
    lines.join("\n")
}

/// Copies `sets` with every `ns_per_op` scaled by `factor` (rounded, at least 1).
pub fn scale_ns(sets: &MetricSets, factor: f64) -> MetricSets {
    sets.iter()
        .map(|set| {
            let ns = ((set.ns_per_op as f64) * factor).round().max(1.0) as u64;
            MetricSet::new(
                set.name.clone(),
                set.iterations,
                ns,
                set.bytes_per_op,
                set.allocs_per_op,
            )
        })
        .collect()
}

pub fn bench_name(idx: usize) -> String {
    format!("Case{idx:05}")
}
