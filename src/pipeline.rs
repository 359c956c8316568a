//! Report-to-figures pipeline: `load -> group -> build_all -> dispatch`.

use crate::aggregate;
use crate::error::Result;
use crate::plot::{self, PlotBackend};
use crate::report::{self, LoadedReport, ReportWarning};
use crate::series::{self, SeriesOptions};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFigure<F> {
    pub case: String,
    pub figure: F,
}

/// Everything produced from one report file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFigures<F> {
    pub report: PathBuf,
    pub warnings: Vec<ReportWarning>,
    pub figures: Vec<CaseFigure<F>>,
}

/// Turn an already loaded report into one figure per case.
pub fn figures_for_report<B>(
    report: LoadedReport,
    options: &SeriesOptions,
    backend: &mut B,
) -> Result<ReportFigures<B::Figure>>
where
    B: PlotBackend + ?Sized,
{
    let LoadedReport {
        path,
        context,
        records,
        warnings,
    } = report;

    let groups = aggregate::group(records)?;
    let series_by_case = series::build_all(&context, &groups, options)?;
    let figures = plot::dispatch(backend, &series_by_case)?;

    let figures = series_by_case
        .into_keys()
        .zip(figures)
        .map(|(case, figure)| CaseFigure { case, figure })
        .collect::<Vec<_>>();
    tracing::debug!(
        path = %path.display(),
        figures = figures.len(),
        "Plotted benchmark report"
    );

    Ok(ReportFigures {
        report: path,
        warnings,
        figures,
    })
}

/// Load and plot a single report file.
pub fn process_report<B>(
    path: &Path,
    options: &SeriesOptions,
    backend: &mut B,
) -> Result<ReportFigures<B::Figure>>
where
    B: PlotBackend + ?Sized,
{
    let report = report::load(path)?;
    figures_for_report(report, options, backend)
}

/// Process reports in order, stopping at the first failure.
///
/// The returned error is wrapped in [`crate::error::Error::Report`] with the failing path.
pub fn run_batch<B, P>(
    paths: &[P],
    options: &SeriesOptions,
    backend: &mut B,
) -> Result<Vec<ReportFigures<B::Figure>>>
where
    B: PlotBackend + ?Sized,
    P: AsRef<Path>,
{
    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let figures =
            process_report(path, options, backend).map_err(|err| err.in_report(path))?;
        results.push(figures);
    }
    let total: usize = results.iter().map(|report| report.figures.len()).sum();
    tracing::info!(
        reports = results.len(),
        figures = total,
        "Generated benchmark plots"
    );
    Ok(results)
}

/// Flatten batch results into the figures alone: report order, then case order.
#[must_use]
pub fn into_figures<F>(results: Vec<ReportFigures<F>>) -> Vec<F> {
    results
        .into_iter()
        .flat_map(|report| report.figures.into_iter().map(|case| case.figure))
        .collect()
}
