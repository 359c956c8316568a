//! Per-case (parameter, cycles) series.

use crate::aggregate::CaseGroups;
use crate::error::{Error, Result};
use crate::name;
use crate::report::{BenchmarkContext, BenchmarkRecord};
use crate::units;
use indexmap::IndexMap;
use serde_json::Value;

const HZ_PER_MHZ: f64 = 1_000_000.0;

/// Where the swept parameter of each record comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SweepSource {
    /// The trailing segment of the benchmark name (`Bench/Case/<index>`).
    #[default]
    NameIndex,
    /// A named record field, typically a user counter such as `radius_cm`.
    Field(String),
}

impl SweepSource {
    #[must_use]
    pub fn from_field(field: Option<&str>) -> Self {
        field.map_or(Self::NameIndex, |name| Self::Field(name.to_string()))
    }

    fn label(&self) -> &str {
        match self {
            Self::NameIndex => "name index",
            Self::Field(name) => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesOptions {
    pub sweep: SweepSource,
    /// Stable-sort points by parameter. Off keeps report order.
    pub sort_by_parameter: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub parameter: f64,
    pub cycles: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub title: String,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    #[must_use]
    pub fn parameters(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.parameter).collect()
    }

    #[must_use]
    pub fn cycles(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.cycles).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

pub type SeriesByCase = IndexMap<String, Series>;

/// CPU cycles spent by one record: `cpu_time * seconds/unit * MHz * 1e6`.
pub fn cycles(context: &BenchmarkContext, record: &BenchmarkRecord) -> Result<f64> {
    let seconds_per_unit = units::to_seconds(&record.time_unit)?;
    Ok(record.cpu_time * seconds_per_unit * context.mhz_per_cpu * HZ_PER_MHZ)
}

pub fn parameter(record: &BenchmarkRecord, sweep: &SweepSource) -> Result<f64> {
    match sweep {
        SweepSource::NameIndex => {
            let decoded = name::decode(&record.raw_name)?;
            parse_parameter(record, sweep, &decoded.parameter_index)
        }
        SweepSource::Field(field) => match record.field(field) {
            None => Err(Error::MissingParameterField {
                raw_name: record.raw_name.clone(),
                field: field.clone(),
            }),
            Some(Value::Number(number)) => {
                number.as_f64().ok_or_else(|| not_numeric(record, sweep, number))
            }
            Some(Value::String(text)) => parse_parameter(record, sweep, text),
            Some(other) => Err(not_numeric(record, sweep, other)),
        },
    }
}

fn parse_parameter(record: &BenchmarkRecord, sweep: &SweepSource, token: &str) -> Result<f64> {
    token
        .trim()
        .parse::<f64>()
        .map_err(|_| not_numeric(record, sweep, token))
}

fn not_numeric(record: &BenchmarkRecord, sweep: &SweepSource, value: impl ToString) -> Error {
    Error::ParameterNotNumeric {
        raw_name: record.raw_name.clone(),
        field: sweep.label().to_string(),
        value: value.to_string(),
    }
}

/// Build the series for one case group.
pub fn build(
    context: &BenchmarkContext,
    group: &[BenchmarkRecord],
    options: &SeriesOptions,
) -> Result<Series> {
    let first = group.first().ok_or(Error::EmptyGroup)?;
    let mut points = group
        .iter()
        .map(|record| {
            Ok(SeriesPoint {
                parameter: parameter(record, &options.sweep)?,
                cycles: cycles(context, record)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if options.sort_by_parameter {
        points.sort_by(|a, b| a.parameter.total_cmp(&b.parameter));
    }

    Ok(Series {
        title: first.raw_name.clone(),
        points,
    })
}

/// Build one series per case, in group order.
pub fn build_all(
    context: &BenchmarkContext,
    groups: &CaseGroups,
    options: &SeriesOptions,
) -> Result<SeriesByCase> {
    groups
        .iter()
        .map(|(case, records)| {
            let series = build(context, records, options)?;
            tracing::debug!(case = %case, points = series.len(), "Built series");
            Ok((case.clone(), series))
        })
        .collect()
}
