//! Partition benchmark records by case.

use crate::error::Result;
use crate::name;
use crate::report::BenchmarkRecord;
use indexmap::IndexMap;

/// Records per case, iterating in first-seen case order.
pub type CaseGroups = IndexMap<String, Vec<BenchmarkRecord>>;

/// Group records by the case segment of their names.
///
/// Fails on the first record whose name does not decode. No partial grouping
/// is returned.
pub fn group<I>(records: I) -> Result<CaseGroups>
where
    I: IntoIterator<Item = BenchmarkRecord>,
{
    let mut groups = CaseGroups::new();
    for record in records {
        let decoded = name::decode(&record.raw_name)?;
        groups.entry(decoded.case).or_default().push(record);
    }
    tracing::trace!(cases = groups.len(), "Grouped benchmark records");
    Ok(groups)
}
