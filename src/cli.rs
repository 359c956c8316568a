//! Command-line arguments.

use crate::config::{CONFIG_PATH_ENV, Config};
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "benchplot")]
#[command(version)]
#[command(about = "Plot Google Benchmark JSON reports as performance-over-parameter charts")]
pub struct Args {
    /// Build workspace searched for benchmark reports.
    #[arg(long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Package whose build directory holds the reports.
    #[arg(long)]
    pub package: Option<String>,

    /// Plot this report instead of discovering reports (repeatable).
    #[arg(long = "report", value_name = "FILE")]
    pub reports: Vec<PathBuf>,

    /// Record field with the swept parameter (default: the name's index segment).
    #[arg(long, value_name = "FIELD")]
    pub sweep_field: Option<String>,

    /// Sort each series by parameter value instead of keeping report order.
    #[arg(long)]
    pub sort_by_parameter: bool,

    /// Directory receiving one SVG per benchmark case.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Open the written figures in the system viewer.
    #[arg(long)]
    pub show_on_screen: bool,

    /// JSON config file.
    #[arg(long, value_name = "FILE", env = CONFIG_PATH_ENV)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Defaults, then the config file, then these flags.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load_or_default(self.config.as_deref())?;
        if let Some(workspace) = &self.workspace {
            config.workspace.clone_from(workspace);
        }
        if let Some(package) = &self.package {
            config.package.clone_from(package);
        }
        if !self.reports.is_empty() {
            config.reports.clone_from(&self.reports);
        }
        if let Some(field) = &self.sweep_field {
            config.sweep_field = Some(field.clone());
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir.clone_from(output_dir);
        }
        // Flags can switch these on but not off.
        config.sort_by_parameter |= self.sort_by_parameter;
        config.show_on_screen |= self.show_on_screen;
        config.validate()?;
        Ok(config)
    }
}
