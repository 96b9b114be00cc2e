//! Filing records returned by discovery.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One investor-presentation filing on the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRecord {
    /// Date the filing was published.
    pub filing_date: NaiveDate,

    /// Attachment file name on the document store.
    pub attachment: String,

    /// Announcement subject line.
    pub subject: String,
}

impl FilingRecord {
    pub fn new(filing_date: NaiveDate, attachment: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            filing_date,
            attachment: attachment.into(),
            subject: subject.into(),
        }
    }

    /// Deduplication key.
    pub fn year_month(&self) -> (i32, u32) {
        (self.filing_date.year(), self.filing_date.month())
    }

    /// Cache file stem, e.g. `202501`.
    pub fn cache_stem(&self) -> String {
        self.filing_date.format("%Y%m").to_string()
    }
}
