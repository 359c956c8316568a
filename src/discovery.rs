//! Locate benchmark reports inside a build workspace.
//!
//! Benchmark binaries write their JSON results next to the package's build
//! output, so every `*.json` below `<workspace>/build/<package>/` is treated
//! as a report.

use crate::config::Config;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Build directory holding the reports of `package`.
#[must_use]
pub fn package_build_dir(workspace: &Path, package: &str) -> PathBuf {
    workspace.join("build").join(package)
}

/// All report files of `package`, sorted by path.
pub fn list_report_files(workspace: &Path, package: &str) -> Result<Vec<PathBuf>> {
    if !workspace.is_dir() {
        return Err(Error::config(format!(
            "Workspace is not a directory: {}",
            workspace.display()
        )));
    }
    if package.trim().is_empty() || package.contains(['/', '\\']) {
        return Err(Error::config(format!("Invalid package name: {package:?}")));
    }

    let build_dir = package_build_dir(workspace, package);
    if !build_dir.is_dir() {
        tracing::warn!(
            path = %build_dir.display(),
            "No build directory for package {package}; no reports found"
        );
        return Ok(Vec::new());
    }

    let pattern = format!(
        "{}/**/*.json",
        glob::Pattern::escape(&build_dir.to_string_lossy())
    );
    let entries = glob::glob(&pattern)
        .map_err(|err| Error::config(format!("Invalid report pattern {pattern}: {err}")))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| Error::from(std::io::Error::from(err)))?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    tracing::debug!(
        path = %build_dir.display(),
        reports = paths.len(),
        "Discovered benchmark reports"
    );
    Ok(paths)
}

/// Reports to process for `config`: the explicit list if any, else discovery.
pub fn resolve_reports(config: &Config) -> Result<Vec<PathBuf>> {
    if config.reports.is_empty() {
        list_report_files(&config.workspace, &config.package)
    } else {
        Ok(config.reports.clone())
    }
}
