//! Performance-over-parameter plots from Google Benchmark JSON reports.
//!
//! A report's records are grouped by the case segment of their
//! `family/case/parameter` names; each case becomes one series of
//! (parameter, CPU cycles) points and one figure.
//!
//! ```no_run
//! use benchplot::pipeline;
//! use benchplot::plot::{PlotStyle, SvgPlotter};
//! use benchplot::series::SeriesOptions;
//! use std::path::Path;
//!
//! # fn main() -> benchplot::error::Result<()> {
//! let mut plotter = SvgPlotter::new(PlotStyle::default())?;
//! let report = pipeline::process_report(
//!     Path::new("build/voxblox/benchmark_e2e.json"),
//!     &SeriesOptions::default(),
//!     &mut plotter,
//! )?;
//! for case in &report.figures {
//!     println!("{}: {} bytes of SVG", case.case, case.figure.svg.len());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod display;
pub mod error;
pub mod name;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod series;
pub mod units;

pub use error::{Error, Result};
