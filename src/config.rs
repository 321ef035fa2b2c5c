//! Run configuration for the gate.

use std::path::PathBuf;
use std::time::Duration;

use crate::baseline::{DEFAULT_BASELINE_FILE, DEFAULT_FETCH_TIMEOUT};
use crate::thresholds::ThresholdTable;

pub const DEFAULT_REPORT_FILE: &str = "performance-report.md";

/// Everything one gate run needs.
///
/// # Default Configuration
///
/// ```rust
/// use benchgate::config::GateConfig;
/// let config = GateConfig::new("bench.txt");
/// assert_eq!(config.baseline_path.to_str(), Some("performance-baseline.json"));
/// assert_eq!(config.report_path.to_str(), Some("performance-report.md"));
/// assert!(config.baseline_url.is_none());
/// ```
#[derive(Clone, Debug)]
pub struct GateConfig {
    /// Benchmark output to check.
    pub results_path: PathBuf,

    /// Local baseline, read as a fallback and rewritten on a clean run.
    pub baseline_path: PathBuf,

    /// Markdown report destination, overwritten every run.
    pub report_path: PathBuf,

    /// Remote baseline consulted before `baseline_path`.
    pub baseline_url: Option<String>,

    /// Upper bound on the remote fetch.
    pub fetch_timeout: Duration,

    pub thresholds: ThresholdTable,
}

impl GateConfig {
    pub fn new(results_path: impl Into<PathBuf>) -> Self {
        Self {
            results_path: results_path.into(),
            baseline_path: PathBuf::from(DEFAULT_BASELINE_FILE),
            report_path: PathBuf::from(DEFAULT_REPORT_FILE),
            baseline_url: None,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            thresholds: ThresholdTable::default(),
        }
    }

    pub fn with_baseline_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.baseline_path = path.into();
        self
    }

    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }

    pub fn with_baseline_url(mut self, url: impl Into<String>) -> Self {
        self.baseline_url = Some(url.into());
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_thresholds(mut self, thresholds: ThresholdTable) -> Self {
        self.thresholds = thresholds;
        self
    }
}
