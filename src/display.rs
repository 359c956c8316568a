//! Writing rendered figures to disk and showing them.

use crate::error::Result;
use crate::pipeline::ReportFigures;
use crate::plot::SvgFigure;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Something that can put written figures in front of a person.
pub trait FigureViewer {
    fn show(&mut self, paths: &[PathBuf]) -> Result<()>;
}

/// Opens each figure with the platform's default viewer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemViewer;

impl FigureViewer for SystemViewer {
    fn show(&mut self, paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            // The openers hand off to the desktop and return immediately.
            let status = opener_command(path)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            match status {
                Ok(status) if status.success() => {
                    tracing::debug!(path = %path.display(), "Opened figure");
                }
                Ok(status) => {
                    tracing::warn!(path = %path.display(), "Figure viewer exited with {status}");
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), "Failed to open figure viewer: {err}");
                }
            }
        }
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}

/// `<report-stem>__<case>.svg`, with anything outside `[A-Za-z0-9_-]` replaced.
#[must_use]
pub fn figure_file_name(report: &Path, case: &str) -> String {
    format!("{}.svg", figure_stem(report, case))
}

fn figure_stem(report: &Path, case: &str) -> String {
    let stem = report.file_stem().map_or_else(
        || "report".to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    );
    format!("{}__{}", sanitize(&stem), sanitize(case))
}

/// File names already handed out in one output directory.
///
/// Names are compared ASCII case-insensitively so that no two figures share a
/// file on case-insensitive filesystems either.
#[derive(Debug, Default)]
struct FileNames {
    taken: HashSet<String>,
}

impl FileNames {
    /// [`figure_file_name`], or `<stem>__<case>__<n>.svg` for the n-th clash.
    fn claim(&mut self, report: &Path, case: &str) -> String {
        let stem = figure_stem(report, case);
        let mut name = format!("{stem}.svg");
        let mut attempt = 2_u32;
        while !self.taken.insert(name.to_ascii_lowercase()) {
            name = format!("{stem}__{attempt}.svg");
            attempt += 1;
        }
        if attempt > 2 {
            tracing::warn!(
                report = %report.display(),
                case,
                "Figure name already used in this run; writing {name} instead"
            );
        }
        name
    }
}

fn sanitize(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}

/// Write every figure of every report into `output_dir`, in order.
///
/// Each figure gets its own file. When two figures would share a name (same
/// report stem from different directories, or cases that only differ in
/// replaced characters) the later one gets a numeric suffix.
pub fn write_figures(
    output_dir: &Path,
    reports: &[ReportFigures<SvgFigure>],
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;
    let mut names = FileNames::default();
    let mut written = Vec::new();
    for report in reports {
        for case in &report.figures {
            let path = output_dir.join(names.claim(&report.report, &case.case));
            fs::write(&path, &case.figure.svg)?;
            tracing::debug!(path = %path.display(), title = %case.figure.title, "Wrote figure");
            written.push(path);
        }
    }
    Ok(written)
}
