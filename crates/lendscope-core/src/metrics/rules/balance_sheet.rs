//! Share capital and reserves from balance sheet tables.

use super::columns::ColumnPick;
use super::patterns::{RESERVE_ROW, SHARE_CAPITAL_ROW, SURPLUS_ROW};
use crate::metrics::cascade::{PageContext, PageRule, TableTier, Tier};
use crate::models::{MetricKey, QuarterlyMetrics};

/// Balance sheet rule: latest column of the share capital and reserves rows.
pub struct BalanceSheetRule {
    share_capital: TableTier,
    reserves: TableTier,
}

impl BalanceSheetRule {
    pub fn new() -> Self {
        Self {
            share_capital: TableTier::new(vec![&*SHARE_CAPITAL_ROW], ColumnPick::Last),
            reserves: TableTier::new(vec![&*RESERVE_ROW, &*SURPLUS_ROW], ColumnPick::Last),
        }
    }
}

impl Default for BalanceSheetRule {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRule for BalanceSheetRule {
    fn name(&self) -> &'static str {
        "balance_sheet"
    }

    fn apply(&self, page: &PageContext<'_>, metrics: &mut QuarterlyMetrics) {
        if !page.text.contains("Balance Sheet") || page.columns.is_none() {
            return;
        }
        if !metrics.is_set(MetricKey::ShareCapitalCr) {
            if let Some(v) = self.share_capital.attempt(page) {
                metrics.set(MetricKey::ShareCapitalCr, v);
            }
        }
        if !metrics.is_set(MetricKey::ReservesCr) {
            if let Some(v) = self.reserves.attempt(page) {
                metrics.set(MetricKey::ReservesCr, v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::cascade::tests::page;

    #[test]
    fn test_balance_sheet_rows() {
        let layout = page(
            0,
            &[
                (60.0, &[("Balance", 10.0), ("Sheet", 60.0)]),
                (100.0, &[("Particulars", 10.0), ("Mar-25", 300.0), ("Dec-25", 400.0)]),
                (140.0, &[("Equity", 10.0), ("Share", 50.0), ("Capital", 90.0), ("123", 300.0), ("124", 400.0)]),
                (180.0, &[("Reserves", 10.0), ("and", 50.0), ("Surplus", 90.0), ("21,500", 300.0), ("23,876", 400.0)]),
                (220.0, &[("Other", 10.0), ("Reserves", 50.0), ("999", 400.0)]),
            ],
        );
        let mut metrics = QuarterlyMetrics::new();
        BalanceSheetRule::new().apply(&PageContext::new(&layout, false), &mut metrics);
        assert_eq!(metrics.get(MetricKey::ShareCapitalCr), Some(124.0));
        assert_eq!(metrics.get(MetricKey::ReservesCr), Some(23876.0));
    }

    #[test]
    fn test_zero_and_missing_values_ignored() {
        let layout = page(
            0,
            &[
                (60.0, &[("Balance", 10.0), ("Sheet", 60.0)]),
                (100.0, &[("Jun", 300.0), ("Sep", 400.0)]),
                (140.0, &[("Share", 10.0), ("Capital", 50.0), ("0", 400.0)]),
                (180.0, &[("Reserves", 10.0), ("&", 50.0), ("Surplus", 90.0), ("800", 300.0)]),
            ],
        );
        let mut metrics = QuarterlyMetrics::new();
        BalanceSheetRule::new().apply(&PageContext::new(&layout, false), &mut metrics);
        assert!(!metrics.is_set(MetricKey::ShareCapitalCr));
        assert!(!metrics.is_set(MetricKey::ReservesCr));
    }
}
