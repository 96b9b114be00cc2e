//! Filing deduplication.

use std::collections::HashSet;

use crate::models::FilingRecord;

/// Keep the first filing seen for each calendar month.
///
/// Input is expected newest first, so the latest filing of each month
/// survives and the output stays newest first.
pub fn latest_per_month(filings: impl IntoIterator<Item = FilingRecord>) -> Vec<FilingRecord> {
    let mut seen = HashSet::new();
    filings
        .into_iter()
        .filter(|f| seen.insert(f.year_month()))
        .collect()
}
