//! Benchmark name decoding.
//!
//! Fixture benchmarks registered with a range are reported as
//! `<Fixture>/<Case>/<arg>`, e.g. `E2EBenchmark/BM_baseline_radius/4`.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecodedName {
    pub family: String,
    pub case: String,
    /// The report's own token, e.g. `4` or `1024`; not guaranteed numeric.
    pub parameter_index: String,
}

impl fmt::Display for DecodedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.family, self.case, self.parameter_index)
    }
}

impl FromStr for DecodedName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        decode(s)
    }
}

/// NFKD-normalize and drop everything outside ASCII.
#[must_use]
pub fn normalize(raw_name: &str) -> String {
    raw_name.nfkd().filter(char::is_ascii).collect()
}

pub fn decode(raw_name: &str) -> Result<DecodedName> {
    let normalized = normalize(raw_name);
    let mut segments = normalized.split('/');
    match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(family), Some(case), Some(parameter_index), None) => Ok(DecodedName {
            family: family.to_string(),
            case: case.to_string(),
            parameter_index: parameter_index.to_string(),
        }),
        _ => Err(Error::name_format(raw_name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_three_segments() {
        let name = decode("E2EBenchmark/BM_baseline_radius/4").expect("decode");
        assert_eq!(name.family, "E2EBenchmark");
        assert_eq!(name.case, "BM_baseline_radius");
        assert_eq!(name.parameter_index, "4");
        assert_eq!(name.to_string(), "E2EBenchmark/BM_baseline_radius/4");
    }

    #[test]
    fn keeps_non_numeric_parameter_token() {
        let name: DecodedName = "Bench/Case/1k".parse().expect("decode");
        assert_eq!(name.parameter_index, "1k");
    }

    #[test]
    fn rejects_wrong_segment_counts() {
        for raw in ["Bench-Case-0", "Bench/Case", "Bench/Case/0/extra", ""] {
            let err = decode(raw).unwrap_err();
            assert!(
                matches!(&err, Error::NameFormat { raw_name } if raw_name == raw),
                "expected name format error for {raw:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn strips_decoration_before_splitting() {
        // "é" decomposes to "e" + combining acute; the accent is dropped.
        let name = decode("Bench/Caf\u{e9}/0").expect("decode");
        assert_eq!(name.case, "Cafe");

        // Fullwidth solidus is compatibility-equivalent to '/'.
        let name = decode("Bench\u{ff0f}Case\u{ff0f}2").expect("decode");
        assert_eq!(name.family, "Bench");
        assert_eq!(name.case, "Case");
        assert_eq!(name.parameter_index, "2");

        let name = decode("Bench/\u{2713}Case/3").expect("decode");
        assert_eq!(name.case, "Case");
    }

    #[test]
    fn error_carries_the_original_name() {
        let raw = "Caf\u{e9}-Bench";
        let err = decode(raw).unwrap_err();
        assert!(matches!(&err, Error::NameFormat { raw_name } if raw_name == raw));
    }
}
