use std::fmt;

use crate::BenchGateError;

pub const DEFAULT_EXECUTION_TIME: f64 = 1.20;
pub const DEFAULT_MEMORY_USAGE: f64 = 1.15;
pub const DEFAULT_THROUGHPUT: f64 = 0.85;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricKind {
    ExecutionTime,
    MemoryUsage,
    Throughput,
}

/// Which side of the threshold counts as worse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Above,
    Below,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [
        MetricKind::ExecutionTime,
        MetricKind::MemoryUsage,
        MetricKind::Throughput,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::ExecutionTime => "execution_time",
            MetricKind::MemoryUsage => "memory_usage",
            MetricKind::Throughput => "throughput",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            MetricKind::ExecutionTime | MetricKind::MemoryUsage => Direction::Above,
            MetricKind::Throughput => Direction::Below,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ratio bounds for each metric kind. Bounds are exclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdTable {
    pub execution_time: f64,
    pub memory_usage: f64,
    pub throughput: f64,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            execution_time: DEFAULT_EXECUTION_TIME,
            memory_usage: DEFAULT_MEMORY_USAGE,
            throughput: DEFAULT_THROUGHPUT,
        }
    }
}

impl ThresholdTable {
    pub fn new(execution_time: f64, memory_usage: f64, throughput: f64) -> Result<Self, BenchGateError> {
        let table = Self {
            execution_time,
            memory_usage,
            throughput,
        };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), BenchGateError> {
        for kind in MetricKind::ALL {
            let value = self.threshold(kind);
            if !value.is_finite() || value <= 0.0 {
                return Err(BenchGateError::invalid_input(format!(
                    "{kind} threshold must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn threshold(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::ExecutionTime => self.execution_time,
            MetricKind::MemoryUsage => self.memory_usage,
            MetricKind::Throughput => self.throughput,
        }
    }

    pub fn is_violation(&self, kind: MetricKind, ratio: f64) -> bool {
        let threshold = self.threshold(kind);
        match kind.direction() {
            Direction::Above => ratio > threshold,
            Direction::Below => ratio < threshold,
        }
    }
}
