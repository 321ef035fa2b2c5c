//! Performance-regression gate for `go test -bench` style output.
//! Run the Criterion benchmark with `cargo bench` to profile parsing, detection and rendering.

pub mod baseline;
pub mod bench_utils;
pub mod config;
pub mod detector;
pub mod errors;
pub mod gate;
pub mod metrics;
pub mod parser;
pub mod report;
pub mod thresholds;

pub use crate::baseline::{BaselineSource, BaselineStore, LocalBaseline, RemoteBaseline};
pub use crate::config::GateConfig;
pub use crate::detector::{RegressionDetector, Violation, detect};
pub use crate::errors::BenchGateError;
pub use crate::gate::{GateRun, RegressionGate};
pub use crate::metrics::{MetricSet, MetricSets};
pub use crate::parser::parse;
pub use crate::report::render;
pub use crate::thresholds::{MetricKind, ThresholdTable};
