//! Benchmark time units.
//!
//! Google Benchmark reports `cpu_time` and `real_time` in the unit named by the
//! record's `time_unit` field.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
}

impl TimeUnit {
    pub const ALL: [Self; 4] = [
        Self::Nanoseconds,
        Self::Microseconds,
        Self::Milliseconds,
        Self::Seconds,
    ];

    /// Factor converting a duration in this unit to seconds.
    #[must_use]
    pub const fn seconds_per_unit(self) -> f64 {
        match self {
            Self::Nanoseconds => 1e-9,
            Self::Microseconds => 1e-6,
            Self::Milliseconds => 1e-3,
            Self::Seconds => 1.0,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "us",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ns" => Ok(Self::Nanoseconds),
            // Micro sign (U+00B5) and Greek mu (U+03BC) both show up in the wild.
            "us" | "\u{b5}s" | "\u{3bc}s" => Ok(Self::Microseconds),
            "ms" => Ok(Self::Milliseconds),
            "s" => Ok(Self::Seconds),
            other => Err(Error::UnknownUnit(other.to_string())),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Multiplier converting a duration labelled `unit` into seconds.
pub fn to_seconds(unit: &str) -> Result<f64> {
    unit.parse::<TimeUnit>().map(TimeUnit::seconds_per_unit)
}
