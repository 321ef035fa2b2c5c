//! Per-benchmark measurements and the name-keyed collection they live in.
//!
//! `ops_per_sec` is derived data. It is computed in [`MetricSet::new`] and
//! nowhere else; a value found in a stored baseline is discarded on decode and
//! recomputed from `ns_per_op`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

#[derive(Clone, Debug, PartialEq)]
pub struct MetricSet {
    pub name: String,
    pub iterations: u64,
    pub ns_per_op: u64,
    pub bytes_per_op: u64,
    pub allocs_per_op: u64,
    ops_per_sec: f64,
}

impl MetricSet {
    pub fn new(
        name: impl Into<String>,
        iterations: u64,
        ns_per_op: u64,
        bytes_per_op: u64,
        allocs_per_op: u64,
    ) -> Self {
        Self {
            name: name.into(),
            iterations,
            ns_per_op,
            bytes_per_op,
            allocs_per_op,
            ops_per_sec: ops_per_sec(ns_per_op),
        }
    }

    /// Operations per second, `1e9 / ns_per_op`. Zero when `ns_per_op` is zero.
    pub fn ops_per_sec(&self) -> f64 {
        self.ops_per_sec
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {}ns/op {}B/op {}allocs/op ({:.1} ops/s)",
            self.name, self.ns_per_op, self.bytes_per_op, self.allocs_per_op, self.ops_per_sec
        )
    }
}

fn ops_per_sec(ns_per_op: u64) -> f64 {
    if ns_per_op == 0 {
        return 0.0;
    }
    NANOS_PER_SEC / ns_per_op as f64
}

/// On-disk shape of one baseline entry. The name is the map key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredMetricSet {
    pub iterations: u64,
    pub ns_per_op: u64,
    pub bytes_per_op: u64,
    pub allocs_per_op: u64,
    /// Written for readers of the file; ignored when decoding.
    #[serde(default)]
    pub ops_per_sec: f64,
}

/// Benchmark name to [`MetricSet`], iterated in name order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, StoredMetricSet>",
    into = "BTreeMap<String, StoredMetricSet>"
)]
pub struct MetricSets {
    sets: BTreeMap<String, MetricSet>,
}

impl MetricSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `set` under its own name, replacing any earlier entry.
    pub fn insert(&mut self, set: MetricSet) -> Option<MetricSet> {
        self.sets.insert(set.name.clone(), set)
    }

    pub fn get(&self, name: &str) -> Option<&MetricSet> {
        self.sets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricSet> {
        self.sets.values()
    }
}

impl FromIterator<MetricSet> for MetricSets {
    fn from_iter<I: IntoIterator<Item = MetricSet>>(iter: I) -> Self {
        let mut sets = MetricSets::new();
        for set in iter {
            sets.insert(set);
        }
        sets
    }
}

impl<'a> IntoIterator for &'a MetricSets {
    type Item = &'a MetricSet;
    type IntoIter = std::collections::btree_map::Values<'a, String, MetricSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.values()
    }
}

impl From<BTreeMap<String, StoredMetricSet>> for MetricSets {
    fn from(stored: BTreeMap<String, StoredMetricSet>) -> Self {
        stored
            .into_iter()
            .map(|(name, s)| {
                MetricSet::new(name, s.iterations, s.ns_per_op, s.bytes_per_op, s.allocs_per_op)
            })
            .collect()
    }
}

impl From<MetricSets> for BTreeMap<String, StoredMetricSet> {
    fn from(sets: MetricSets) -> Self {
        sets.sets
            .into_iter()
            .map(|(name, set)| {
                let stored = StoredMetricSet {
                    iterations: set.iterations,
                    ns_per_op: set.ns_per_op,
                    bytes_per_op: set.bytes_per_op,
                    allocs_per_op: set.allocs_per_op,
                    ops_per_sec: set.ops_per_sec,
                };
                (name, stored)
            })
            .collect()
    }
}
