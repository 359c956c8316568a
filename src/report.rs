//! Google Benchmark JSON report loader.
//!
//! A report is the output of a benchmark binary run with
//! `--benchmark_format=json`: a `context` block describing the machine and
//! build, and a flat `benchmarks` array with one record per run.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const REQUIRED_CONTEXT_FIELDS: [&str; 3] =
    ["cpu_scaling_enabled", "library_build_type", "mhz_per_cpu"];
const RELEASE_BUILD_TYPE: &str = "release";

/// Machine and build metadata shared by every record of one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkContext {
    pub cpu_scaling_enabled: bool,
    pub library_build_type: String,
    pub mhz_per_cpu: f64,
    /// Remaining context keys (`date`, `host_name`, `caches`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    #[serde(rename = "name")]
    pub raw_name: String,
    pub cpu_time: f64,
    pub time_unit: String,
    /// Counters and any other per-run fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BenchmarkRecord {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

/// Conditions that make measurements suspect without stopping the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportWarning {
    CpuScalingEnabled,
    NonReleaseBuild(String),
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CpuScalingEnabled => {
                f.write_str("dynamic frequency scaling was active during the benchmarking")
            }
            Self::NonReleaseBuild(build_type) => write!(
                f,
                "benchmarking was run on a non release build ({build_type})"
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedReport {
    pub path: PathBuf,
    pub context: BenchmarkContext,
    pub records: Vec<BenchmarkRecord>,
    pub warnings: Vec<ReportWarning>,
}

/// Read and validate the report at `path`.
pub fn load(path: &Path) -> Result<LoadedReport> {
    let content = fs::read_to_string(path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            Error::ReportNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::from(err)
        }
    })?;
    parse(path, &content)
}

/// Parse report text; `path` is only used for error messages.
pub fn parse(path: &Path, content: &str) -> Result<LoadedReport> {
    let document: Value = serde_json::from_str(content)
        .map_err(|err| Error::malformed(path, format!("invalid JSON: {err}")))?;
    let Value::Object(mut document) = document else {
        return Err(Error::malformed(path, "top-level value is not an object"));
    };

    let context = match document.remove("context") {
        Some(Value::Object(context)) => parse_context(path, context)?,
        Some(_) => return Err(Error::malformed(path, "\"context\" is not an object")),
        None => return Err(Error::malformed(path, "missing \"context\" object")),
    };
    let benchmarks = match document.remove("benchmarks") {
        Some(Value::Array(benchmarks)) => benchmarks,
        Some(_) => return Err(Error::malformed(path, "\"benchmarks\" is not an array")),
        None => return Err(Error::malformed(path, "missing \"benchmarks\" array")),
    };

    let records = benchmarks
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<BenchmarkRecord>(value)
                .map_err(|err| Error::malformed(path, format!("benchmarks[{index}]: {err}")))
        })
        .collect::<Result<Vec<_>>>()?;

    let warnings = context_warnings(&context);
    for warning in &warnings {
        tracing::warn!(path = %path.display(), "{warning}");
    }
    tracing::debug!(
        path = %path.display(),
        records = records.len(),
        mhz_per_cpu = context.mhz_per_cpu,
        "Loaded benchmark report"
    );

    Ok(LoadedReport {
        path: path.to_path_buf(),
        context,
        records,
        warnings,
    })
}

fn parse_context(path: &Path, context: Map<String, Value>) -> Result<BenchmarkContext> {
    for field in REQUIRED_CONTEXT_FIELDS {
        if !context.contains_key(field) {
            return Err(Error::malformed(
                path,
                format!("context is missing \"{field}\""),
            ));
        }
    }
    let context: BenchmarkContext = serde_json::from_value(Value::Object(context))
        .map_err(|err| Error::malformed(path, format!("context: {err}")))?;
    if !context.mhz_per_cpu.is_finite() || context.mhz_per_cpu <= 0.0 {
        return Err(Error::malformed(
            path,
            format!(
                "context.mhz_per_cpu must be a positive number, got {}",
                context.mhz_per_cpu
            ),
        ));
    }
    Ok(context)
}

#[must_use]
pub fn context_warnings(context: &BenchmarkContext) -> Vec<ReportWarning> {
    let mut warnings = Vec::new();
    if context.cpu_scaling_enabled {
        warnings.push(ReportWarning::CpuScalingEnabled);
    }
    if context.library_build_type != RELEASE_BUILD_TYPE {
        warnings.push(ReportWarning::NonReleaseBuild(
            context.library_build_type.clone(),
        ));
    }
    warnings
}
