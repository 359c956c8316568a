//! Common test infrastructure for `benchplot`.
//!
//! - [`TestHarness`]: a temporary directory with helpers for laying out a
//!   build workspace and writing files into it
//! - [`ReportBuilder`]: Google Benchmark JSON reports assembled in code
//! - [`RecordingBackend`]: a plot backend that records every call

#![allow(dead_code)]

use benchplot::plot::PlotBackend;
use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness providing a temp directory.
pub struct TestHarness {
    name: String,
    temp_dir: TempDir,
}

impl TestHarness {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn temp_path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.temp_dir.path().join(path)
    }

    /// Create a file (and its parent directories) in the temp directory.
    pub fn create_file(&self, name: impl AsRef<Path>, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.temp_path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to create test file");
        path
    }

    pub fn create_dir(&self, name: impl AsRef<Path>) -> PathBuf {
        let path = self.temp_path(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Write `report` where discovery expects it: `build/<package>/<file>`.
    pub fn write_package_report(
        &self,
        package: &str,
        file: &str,
        report: &ReportBuilder,
    ) -> PathBuf {
        self.create_file(
            Path::new("build").join(package).join(file),
            report.to_json_string(),
        )
    }
}

/// Builds a Google Benchmark style JSON report.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    context: Map<String, Value>,
    benchmarks: Vec<Value>,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new(1000.0)
    }
}

impl ReportBuilder {
    pub fn new(mhz_per_cpu: f64) -> Self {
        let mut context = Map::new();
        context.insert("date".into(), json!("2017-08-01 12:00:00"));
        context.insert("num_cpus".into(), json!(8));
        context.insert("mhz_per_cpu".into(), json!(mhz_per_cpu));
        context.insert("cpu_scaling_enabled".into(), json!(false));
        context.insert("library_build_type".into(), json!("release"));
        Self {
            context,
            benchmarks: Vec::new(),
        }
    }

    pub fn context(mut self, key: &str, value: Value) -> Self {
        self.context.insert(key.to_string(), value);
        self
    }

    pub fn without_context(mut self, key: &str) -> Self {
        self.context.remove(key);
        self
    }

    pub fn record(self, name: &str, cpu_time: f64, time_unit: &str) -> Self {
        self.record_with(name, cpu_time, time_unit, &[])
    }

    pub fn record_with(
        mut self,
        name: &str,
        cpu_time: f64,
        time_unit: &str,
        extra: &[(&str, Value)],
    ) -> Self {
        let mut record = Map::new();
        record.insert("name".into(), json!(name));
        record.insert("iterations".into(), json!(1000));
        record.insert("real_time".into(), json!(cpu_time * 1.01));
        record.insert("cpu_time".into(), json!(cpu_time));
        record.insert("time_unit".into(), json!(time_unit));
        for (key, value) in extra {
            record.insert((*key).to_string(), value.clone());
        }
        self.benchmarks.push(Value::Object(record));
        self
    }

    pub fn to_value(&self) -> Value {
        json!({
            "context": Value::Object(self.context.clone()),
            "benchmarks": self.benchmarks,
        })
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.to_value()).expect("serialize report")
    }
}

/// One recorded `plot_series` call.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotCall {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub title: String,
}

/// Records calls and returns the call index as the figure.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<PlotCall>,
}

impl PlotBackend for RecordingBackend {
    type Figure = usize;

    fn plot_series(&mut self, x: &[f64], y: &[f64], title: &str) -> benchplot::Result<usize> {
        self.calls.push(PlotCall {
            x: x.to_vec(),
            y: y.to_vec(),
            title: title.to_string(),
        });
        Ok(self.calls.len() - 1)
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = expected.abs().max(1.0) * 1e-9;
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}
