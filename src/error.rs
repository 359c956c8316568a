//! Error types for report loading, decoding, series construction and plotting.

use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Benchmark report not found: {}", path.display())]
    ReportNotFound { path: PathBuf },

    #[error("Malformed benchmark report {}: {reason}", path.display())]
    ReportMalformed { path: PathBuf, reason: String },

    #[error("Unknown time unit: {0:?}")]
    UnknownUnit(String),

    #[error("Benchmark name {raw_name:?} is not of the form family/case/parameter")]
    NameFormat { raw_name: String },

    #[error("Benchmark {raw_name:?} has no field {field:?} to sweep over")]
    MissingParameterField { raw_name: String, field: String },

    #[error("Benchmark {raw_name:?} has a non-numeric value for {field:?}: {value}")]
    ParameterNotNumeric {
        raw_name: String,
        field: String,
        value: String,
    },

    #[error("Cannot build a series from an empty case group")]
    EmptyGroup,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("IO error: {0}")]
    Io(#[from] Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] Box<serde_json::Error>),

    #[error("Failed to process benchmark report {}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn plot(message: impl Into<String>) -> Self {
        Self::Plot(message.into())
    }

    pub fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        Self::ReportMalformed {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn name_format(raw_name: impl Into<String>) -> Self {
        Self::NameFormat {
            raw_name: raw_name.into(),
        }
    }

    /// Attach the report path to an error raised while processing that report.
    #[must_use]
    pub fn in_report(self, path: &Path) -> Self {
        match self {
            already @ Self::Report { .. } => already,
            other => Self::Report {
                path: path.to_path_buf(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, skipping any `Report` wrappers.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Report { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(Box::new(err))
    }
}
