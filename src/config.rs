//! Run configuration.
//!
//! Built once per invocation: defaults, then an optional JSON config file,
//! then command-line overrides (see [`crate::cli::Args::resolve_config`]).

use crate::error::{Error, Result};
use crate::plot::PlotStyle;
use crate::series::{SeriesOptions, SweepSource};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "BENCHPLOT_CONFIG";
pub const DEFAULT_PACKAGE: &str = "voxblox";
pub const DEFAULT_OUTPUT_DIR: &str = "benchmark_plots";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build workspace searched for reports.
    pub workspace: PathBuf,
    /// Package whose build directory holds the reports.
    pub package: String,
    /// Explicit report files. When non-empty, discovery is skipped.
    pub reports: Vec<PathBuf>,
    /// Record field holding the swept parameter. Unset uses the name index.
    pub sweep_field: Option<String>,
    pub sort_by_parameter: bool,
    pub output_dir: PathBuf,
    pub show_on_screen: bool,
    pub style: PlotStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from("."),
            package: DEFAULT_PACKAGE.to_string(),
            reports: Vec::new(),
            sweep_field: None,
            sort_by_parameter: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            show_on_screen: false,
            style: PlotStyle::default(),
        }
    }
}

impl Config {
    /// Load a config file. Keys absent from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| {
            Error::config(format!("Failed to read config {}: {err}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|err| {
            Error::config(format!("Failed to parse config {}: {err}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise start from defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn validate(&self) -> Result<()> {
        if self.package.trim().is_empty() {
            return Err(Error::config("package is empty"));
        }
        if let Some(field) = &self.sweep_field {
            if field.trim().is_empty() {
                return Err(Error::config("sweep_field is empty"));
            }
        }
        self.style.validate()
    }

    #[must_use]
    pub fn series_options(&self) -> SeriesOptions {
        SeriesOptions {
            sweep: SweepSource::from_field(self.sweep_field.as_deref()),
            sort_by_parameter: self.sort_by_parameter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.workspace, PathBuf::from("."));
        assert_eq!(config.package, "voxblox");
        assert!(!config.show_on_screen);
        assert!(!config.sort_by_parameter);
        assert_eq!(config.series_options(), SeriesOptions::default());
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("benchplot.json");
        fs::write(
            &path,
            r##"{
                "package": "voxblox_fast",
                "sweep_field": "radius_cm",
                "sort_by_parameter": true,
                "style": { "line_color": "#0000FF" }
            }"##,
        )
        .expect("write config");

        let config = Config::load(&path).expect("load config");
        assert_eq!(config.package, "voxblox_fast");
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.style.line_color, "#0000FF");
        assert_eq!(config.style.y_label, PlotStyle::default().y_label);
        assert_eq!(
            config.series_options(),
            SeriesOptions {
                sweep: SweepSource::Field("radius_cm".to_string()),
                sort_by_parameter: true,
            }
        );
    }

    #[test]
    fn invalid_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ package: ").expect("write config");
        assert!(matches!(Config::load(&path).unwrap_err(), Error::Config(_)));

        fs::write(&path, r#"{ "sweep_field": "  " }"#).expect("write config");
        assert!(matches!(Config::load(&path).unwrap_err(), Error::Config(_)));

        fs::write(&path, r#"{ "style": { "grid_color": "white" } }"#).expect("write config");
        assert!(matches!(Config::load(&path).unwrap_err(), Error::Config(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Config::load_or_default(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "got {err:?}");
        assert_eq!(Config::load_or_default(None).expect("defaults"), Config::default());
    }
}
