#![forbid(unsafe_code)]

//! CLI binary: plot every benchmark case of one or more reports.
//!
//! ```text
//! cargo run --bin benchplot -- \
//!   --workspace ~/catkin_ws \
//!   --package voxblox \
//!   --sweep-field radius_cm \
//!   --output-dir /tmp/plots \
//!   --show-on-screen
//! ```

use anyhow::{Context, Result};
use benchplot::cli::Args;
use benchplot::display::{self, FigureViewer, SystemViewer};
use benchplot::plot::SvgPlotter;
use benchplot::{discovery, pipeline};
use clap::Parser;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "BENCHPLOT_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    if let Err(err) = main_impl() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn main_impl() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = args.resolve_config().context("resolving configuration")?;
    let reports = discovery::resolve_reports(&config).context("locating benchmark reports")?;
    if reports.is_empty() {
        eprintln!(
            "No benchmark reports found for package {} in {}",
            config.package,
            config.workspace.display()
        );
        return Ok(());
    }

    let mut plotter = SvgPlotter::new(config.style.clone())?;
    let results = pipeline::run_batch(&reports, &config.series_options(), &mut plotter)
        .context("plotting benchmark reports")?;

    let written = display::write_figures(&config.output_dir, &results).with_context(|| {
        format!("writing figures to {}", config.output_dir.display())
    })?;

    for report in &results {
        eprintln!(
            "{}: {} figure(s), {} warning(s)",
            report.report.display(),
            report.figures.len(),
            report.warnings.len()
        );
    }
    eprintln!("\nFigures written to: {}", config.output_dir.display());

    if config.show_on_screen {
        SystemViewer.show(&written)?;
    }

    Ok(())
}
