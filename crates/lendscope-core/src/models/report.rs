//! The persisted per-company artifact.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::company::CompanyProfile;
use super::metrics::QuarterlyMetrics;

/// Quarterly metrics for one company, newest quarter first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyQuarterlyReport {
    /// Company display name.
    pub company: String,

    /// BSE scrip code.
    pub bse_code: String,

    /// NSE trading symbol.
    pub nse_symbol: String,

    /// Face value per share.
    pub face_value: f64,

    /// When the report was generated.
    pub last_updated: DateTime<Local>,

    /// Extracted quarters, newest to oldest.
    pub quarters: Vec<QuarterlyMetrics>,
}

impl CompanyQuarterlyReport {
    /// Build a report for `profile` stamped with the current time.
    pub fn new(profile: &CompanyProfile, quarters: Vec<QuarterlyMetrics>) -> Self {
        Self {
            company: profile.name.clone(),
            bse_code: profile.bse_code.clone(),
            nse_symbol: profile.nse_symbol.clone(),
            face_value: profile.face_value,
            last_updated: Local::now(),
            quarters,
        }
    }

    /// Most recent quarter, if any was parsed.
    pub fn latest(&self) -> Option<&QuarterlyMetrics> {
        self.quarters.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_serializes_with_empty_quarters() {
        let profile = CompanyProfile::new("x", "X Finance", "123", "XFIN");
        let report = CompanyQuarterlyReport::new(&profile, Vec::new());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["company"], "X Finance");
        assert_eq!(json["bse_code"], "123");
        assert_eq!(json["quarters"], serde_json::json!([]));
        assert!(report.latest().is_none());
    }
}
