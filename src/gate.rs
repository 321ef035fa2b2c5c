//! One end-to-end gate run: parse, load, detect, render, persist.

use std::fs;

use tracing::{debug, error, info, warn};

use crate::BenchGateError;
use crate::baseline::{BaselineStore, write_atomic};
use crate::config::GateConfig;
use crate::detector::{RegressionDetector, Violation};
use crate::metrics::MetricSets;
use crate::parser;
use crate::report;

pub const EXIT_PASS: i32 = 0;
pub const EXIT_FAIL: i32 = 1;
pub const EXIT_OUTPUT_ERROR: i32 = 2;

#[derive(Debug)]
pub struct GateRun {
    pub current: MetricSets,
    pub baseline: MetricSets,
    pub violations: Vec<Violation>,
    pub report: String,
    pub report_written: bool,
    pub baseline_updated: bool,
    pub write_errors: Vec<BenchGateError>,
}

impl GateRun {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Regressions always yield 1; a clean run that failed to write yields 2.
    pub fn exit_code(&self) -> i32 {
        if !self.passed() {
            EXIT_FAIL
        } else if !self.write_errors.is_empty() {
            EXIT_OUTPUT_ERROR
        } else {
            EXIT_PASS
        }
    }
}

pub struct RegressionGate {
    config: GateConfig,
    store: BaselineStore,
    detector: RegressionDetector,
}

impl RegressionGate {
    pub fn new(config: GateConfig) -> Result<Self, BenchGateError> {
        config.thresholds.validate()?;
        let mut store = BaselineStore::new(config.baseline_path.clone());
        if let Some(url) = &config.baseline_url {
            store = store.with_remote(url.clone(), config.fetch_timeout);
        }
        let detector = RegressionDetector::new(config.thresholds);
        Ok(Self {
            config,
            store,
            detector,
        })
    }

    /// Reads and parses the results file. An unreadable file or one without
    /// any benchmark lines is fatal. Bytes that are not UTF-8 are replaced
    /// before parsing.
    pub fn read_results(&self) -> Result<MetricSets, BenchGateError> {
        let path = &self.config.results_path;
        let bytes = fs::read(path)
            .map_err(|e| BenchGateError::input(format!("read {}: {e}", path.display())))?;
        let current = parser::parse(&String::from_utf8_lossy(&bytes));
        if current.is_empty() {
            return Err(BenchGateError::no_benchmarks(path.display().to_string()));
        }
        Ok(current)
    }

    /// Fails before writing anything when the results are unusable or the
    /// local baseline exists but cannot be decoded.
    pub fn run(&self) -> Result<GateRun, BenchGateError> {
        let current = self.read_results()?;
        info!(benchmarks = current.len(), "parsed results");
        for set in &current {
            debug!("{}", set.summary());
        }

        let baseline = self.store.load()?;
        let violations = self.detector.detect(&current, &baseline);
        info!(violations = violations.len(), "compared against baseline");
        let report = report::render(&current, &baseline, &violations);

        let mut write_errors = Vec::new();
        let report_written = match write_atomic(&self.config.report_path, report.as_bytes()) {
            Ok(()) => true,
            Err(err) => {
                error!(path = %self.config.report_path.display(), error = %err, "report not written");
                write_errors.push(err);
                false
            }
        };

        let mut baseline_updated = false;
        if violations.is_empty() {
            match self.store.save(&current) {
                Ok(()) => baseline_updated = true,
                Err(err) => {
                    error!(path = %self.store.path().display(), error = %err, "baseline not updated");
                    write_errors.push(err);
                }
            }
        } else {
            warn!(
                violations = violations.len(),
                "regressions found, baseline left unchanged"
            );
        }

        Ok(GateRun {
            current,
            baseline,
            violations,
            report,
            report_written,
            baseline_updated,
            write_errors,
        })
    }
}
