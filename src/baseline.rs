//! Loading and saving the baseline snapshot.
//!
//! `load` walks an ordered list of [`BaselineSource`]s: the remote endpoint
//! when one is configured, then the local file. A source can report a
//! baseline, report that it has none, or fail. A failed remote is logged and
//! the next source is tried. A local file that exists but cannot be read or
//! decoded fails the load. Only when every source comes up empty is the
//! baseline empty, so nothing can regress on a first run.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::blocking::Client;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::BenchGateError;
use crate::metrics::MetricSets;

pub const DEFAULT_BASELINE_FILE: &str = "performance-baseline.json";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

pub trait BaselineSource {
    fn describe(&self) -> String;

    /// `Ok(None)` means the source has no baseline to offer.
    fn fetch(&self) -> Result<Option<MetricSets>, BenchGateError>;

    /// Whether a failed fetch may fall through to the next source.
    fn may_fall_through(&self) -> bool {
        true
    }
}

#[derive(Clone, Debug)]
pub struct RemoteBaseline {
    url: String,
    timeout: Duration,
}

impl RemoteBaseline {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

impl BaselineSource for RemoteBaseline {
    fn describe(&self) -> String {
        format!("remote {}", self.url)
    }

    fn fetch(&self) -> Result<Option<MetricSets>, BenchGateError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| BenchGateError::baseline(format!("client: {e}")))?;
        let response = client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| BenchGateError::baseline(format!("GET {}: {e}", self.url)))?;
        let sets = response
            .json::<MetricSets>()
            .map_err(|e| BenchGateError::baseline(format!("decode {}: {e}", self.url)))?;
        Ok(Some(sets))
    }
}

#[derive(Clone, Debug)]
pub struct LocalBaseline {
    path: PathBuf,
}

impl LocalBaseline {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BaselineSource for LocalBaseline {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn fetch(&self) -> Result<Option<MetricSets>, BenchGateError> {
        load_sets_from(&self.path)
    }

    fn may_fall_through(&self) -> bool {
        false
    }
}

pub struct BaselineStore {
    sources: Vec<Box<dyn BaselineSource>>,
    local: LocalBaseline,
}

impl BaselineStore {
    /// A store backed only by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let local = LocalBaseline::new(path);
        Self {
            sources: vec![Box::new(local.clone())],
            local,
        }
    }

    /// Consults `url` before the local file.
    pub fn with_remote(mut self, url: impl Into<String>, timeout: Duration) -> Self {
        self.sources
            .insert(0, Box::new(RemoteBaseline::new(url, timeout)));
        self
    }

    /// Replaces the source chain. `save` still targets the local file.
    pub fn with_sources(mut self, sources: Vec<Box<dyn BaselineSource>>) -> Self {
        self.sources = sources;
        self
    }

    pub fn path(&self) -> &Path {
        self.local.path()
    }

    pub fn load(&self) -> Result<MetricSets, BenchGateError> {
        for source in &self.sources {
            match source.fetch() {
                Ok(Some(sets)) => {
                    info!(source = %source.describe(), benchmarks = sets.len(), "loaded baseline");
                    return Ok(sets);
                }
                Ok(None) => debug!(source = %source.describe(), "no baseline available"),
                Err(err) if source.may_fall_through() => {
                    warn!(source = %source.describe(), error = %err, "baseline source failed")
                }
                Err(err) => return Err(err),
            }
        }
        debug!("no baseline found, comparing against nothing");
        Ok(MetricSets::new())
    }

    /// Overwrites the local baseline file with `sets`.
    pub fn save(&self, sets: &MetricSets) -> Result<(), BenchGateError> {
        let data = serde_json::to_vec_pretty(sets)
            .map_err(|e| BenchGateError::output(format!("encode baseline: {e}")))?;
        write_atomic(self.local.path(), &data)
    }
}

fn load_sets_from(path: &Path) -> Result<Option<MetricSets>, BenchGateError> {
    if !path.exists() {
        return Ok(None);
    }
    // An empty file is a truncated baseline, not an empty one; it fails to decode.
    let data = fs::read(path)
        .map_err(|e| BenchGateError::baseline(format!("read {}: {e}", path.display())))?;
    serde_json::from_slice(&data)
        .map(Some)
        .map_err(|e| BenchGateError::baseline(format!("decode {}: {e}", path.display())))
}

/// Writes `data` to a sibling temp file and renames it over `path`.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<(), BenchGateError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| BenchGateError::output(format!("temp file in {}: {e}", dir.display())))?;
    let written = tmp.write_all(data).and_then(|_| {
        if let Some(perms) = target_permissions(path)? {
            tmp.as_file().set_permissions(perms)?;
        }
        tmp.as_file().sync_all()
    });
    written.map_err(|e| BenchGateError::output(format!("write {}: {e}", path.display())))?;
    tmp.persist(path)
        .map_err(|e| BenchGateError::output(format!("replace {}: {}", path.display(), e.error)))?;
    Ok(())
}

/// Mode for the replacement file: the existing target's, else `0o644` on unix
/// rather than the owner-only mode temp files are created with.
fn target_permissions(path: &Path) -> std::io::Result<Option<fs::Permissions>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.permissions())),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(default_permissions()),
        Err(err) => Err(err),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
