//! Net interest income and profit after tax.

use tracing::trace;

use super::columns::{assign_to_columns, numeric_tokens, ColumnPick};
use super::numbers::strictly_within;
use super::patterns::{NII_KEYWORDS, NII_ROW, PAT_KEYWORDS, PAT_ROW, PL_PAGE};
use crate::metrics::cascade::{NarrativeTier, PageContext, PageRule, Tier};
use crate::models::{MetricKey, QuarterlyMetrics};

/// Segments ignored for lending-only companies.
const NON_LENDING_SEGMENTS: &[&str] = &["Housing", "Wealth", "Insurance", "AMC"];

const NII_TABLE_RANGE: (f64, f64) = (10.0, 50_000.0);
const PAT_TABLE_LIMIT: f64 = 20_000.0;

/// Whether a row is a net interest income line.
pub fn is_nii_row(text: &str) -> bool {
    NII_ROW.is_match(text)
}

/// Whether a row is a profit-after-tax line (and not profit before tax).
pub fn is_pat_row(text: &str) -> bool {
    PAT_ROW.is_match(text) && !text.to_lowercase().contains("before")
}

/// Values found in a P&L table, by variant.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct TableIncome {
    nii_plain: Option<f64>,
    nii_with_fees: Option<f64>,
    pat_plain: Option<f64>,
    pat_excl: Option<f64>,
}

impl TableIncome {
    /// NII including fees is preferred over the plain line.
    fn nii(&self) -> Option<f64> {
        self.nii_with_fees.or(self.nii_plain)
    }

    /// PAT excluding exceptional items is preferred over the plain line.
    fn pat(&self) -> Option<f64> {
        self.pat_excl.or(self.pat_plain)
    }
}

/// NII and PAT from quarterly P&L tables, with narrative fallbacks.
pub struct IncomeRule {
    nii_narrative: NarrativeTier,
    pat_narrative: NarrativeTier,
}

impl IncomeRule {
    pub fn new() -> Self {
        Self {
            nii_narrative: NarrativeTier::new(&NII_KEYWORDS, 50.0, 50_000.0),
            pat_narrative: NarrativeTier::new(&PAT_KEYWORDS, 10.0, 20_000.0),
        }
    }

    fn scan_table(&self, page: &PageContext<'_>, cols: &[f64]) -> TableIncome {
        let mut found = TableIncome::default();

        for (row, text) in page.rows() {
            if page.lending_only && NON_LENDING_SEGMENTS.iter().any(|kw| text.contains(kw)) {
                continue;
            }
            let nums = numeric_tokens(row);
            if nums.is_empty() {
                continue;
            }
            let values = assign_to_columns(&nums, cols);
            let value = ColumnPick::CurrentQuarter.pick(&values, page.quarter_labels);
            let lower = text.to_lowercase();

            if is_nii_row(text) {
                if let Some(v) = value.filter(|v| strictly_within(*v, NII_TABLE_RANGE.0, NII_TABLE_RANGE.1)) {
                    if lower.contains("fee") || lower.contains("inc.") {
                        found.nii_with_fees = Some(v);
                    } else {
                        found.nii_plain = Some(v);
                    }
                }
            }

            if is_pat_row(text) {
                if let Some(v) = value.filter(|v| v.abs() < PAT_TABLE_LIMIT) {
                    if lower.contains("excl") {
                        found.pat_excl = Some(v);
                    } else if !lower.contains("incld") {
                        found.pat_plain = Some(v);
                    }
                }
            }
        }

        found
    }
}

impl Default for IncomeRule {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRule for IncomeRule {
    fn name(&self) -> &'static str {
        "income"
    }

    fn apply(&self, page: &PageContext<'_>, metrics: &mut QuarterlyMetrics) {
        if !PL_PAGE.is_match(page.text) {
            return;
        }

        if let Some(cols) = page.columns.as_deref() {
            let table = self.scan_table(page, cols);
            trace!("P&L table on page: {:?}", table);
            if let Some(v) = table.nii() {
                metrics.set(MetricKey::NiiCr, v);
            }
            if let Some(v) = table.pat() {
                metrics.set(MetricKey::PatCr, v);
            }
        }

        if !metrics.is_set(MetricKey::NiiCr) {
            if let Some(v) = self.nii_narrative.attempt(page) {
                metrics.set(MetricKey::NiiCr, v);
            }
        }
        if !metrics.is_set(MetricKey::PatCr) {
            if let Some(v) = self.pat_narrative.attempt(page) {
                metrics.set(MetricKey::PatCr, v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::cascade::tests::page;
    use crate::pdf::PageLayout;

    fn run(layout: &PageLayout, lending_only: bool) -> QuarterlyMetrics {
        let mut metrics = QuarterlyMetrics::new();
        IncomeRule::new().apply(&PageContext::new(layout, lending_only), &mut metrics);
        metrics
    }

    #[test]
    fn test_row_classification() {
        assert!(is_nii_row("Net Interest Income 1,234"));
        assert!(is_pat_row("Profit after tax 512"));
        assert!(!is_pat_row("Profit before tax 700"));
    }

    #[test]
    fn test_three_columns_uses_last() {
        let layout = page(
            0,
            &[
                (80.0, &[("Particulars", 40.0), ("Q3FY25", 300.0), ("Q2FY26", 400.0), ("Q3FY26", 500.0)]),
                (120.0, &[("NII", 40.0), ("1,200", 300.0), ("1,350", 400.0), ("1,420", 500.0)]),
                (160.0, &[("Profit", 40.0), ("after", 80.0), ("tax", 110.0), ("450", 300.0), ("480", 400.0), ("510", 500.0)]),
            ],
        );
        let metrics = run(&layout, false);
        assert_eq!(metrics.get(MetricKey::NiiCr), Some(1420.0));
        assert_eq!(metrics.get(MetricKey::PatCr), Some(510.0));
    }

    #[test]
    fn test_wide_table_uses_third_column() {
        let layout = page(
            0,
            &[
                (80.0, &[("Q3FY26", 200.0), ("Q3FY25", 300.0), ("Q2FY26", 400.0), ("Q1FY26", 500.0), ("Q4FY25", 600.0)]),
                (120.0, &[("NII", 40.0), ("1,420", 200.0), ("1,200", 300.0), ("1,350", 400.0), ("4,100", 500.0), ("5,300", 600.0)]),
            ],
        );
        let metrics = run(&layout, false);
        assert_eq!(metrics.get(MetricKey::NiiCr), Some(1350.0));
    }

    #[test]
    fn test_variant_preferences() {
        let layout = page(
            0,
            &[
                (80.0, &[("Q2FY26", 400.0), ("Q3FY26", 500.0)]),
                (120.0, &[("NII", 40.0), ("(inc.", 70.0), ("fees)", 100.0), ("1,500", 400.0), ("1,610", 500.0)]),
                (160.0, &[("NII", 40.0), ("1,350", 400.0), ("1,420", 500.0)]),
                (200.0, &[("PAT", 20.0), ("excl", 40.0), ("exceptional", 70.0), ("Profit", 110.0), ("after", 140.0), ("Tax", 170.0), ("480", 400.0), ("505", 500.0)]),
                (240.0, &[("Profit", 40.0), ("after", 80.0), ("Tax", 110.0), ("incld", 140.0), ("one-off", 170.0), ("300", 400.0), ("330", 500.0)]),
                (280.0, &[("Profit", 40.0), ("after", 80.0), ("Tax", 110.0), ("470", 400.0), ("490", 500.0)]),
            ],
        );
        let metrics = run(&layout, false);
        assert_eq!(metrics.get(MetricKey::NiiCr), Some(1610.0));
        assert_eq!(metrics.get(MetricKey::PatCr), Some(505.0));
    }

    #[test]
    fn test_loss_is_kept() {
        let layout = page(
            0,
            &[
                (80.0, &[("Q2FY26", 400.0), ("Q3FY26", 500.0)]),
                (120.0, &[("Profit/(Loss)", 40.0), ("after", 90.0), ("Tax", 120.0), ("12", 400.0), ("(85)", 500.0)]),
            ],
        );
        assert_eq!(run(&layout, false).get(MetricKey::PatCr), Some(-85.0));
    }

    #[test]
    fn test_lending_only_skips_segment_rows() {
        let layout = page(
            0,
            &[
                (80.0, &[("Q2FY26", 400.0), ("Q3FY26", 500.0)]),
                (120.0, &[("NII", 60.0), ("1,350", 400.0), ("1,420", 500.0)]),
                (160.0, &[("Insurance", 10.0), ("NII", 60.0), ("900", 400.0), ("950", 500.0)]),
            ],
        );
        assert_eq!(run(&layout, true).get(MetricKey::NiiCr), Some(1420.0));
        assert_eq!(run(&layout, false).get(MetricKey::NiiCr), Some(950.0));
    }

    #[test]
    fn test_narrative_fallback() {
        let layout = PageLayout::default().with_text(
            "Net Interest Income for the quarter grew 22% to ₹ 10,057 crore.\n\
             Profit after tax for Q3 FY26 was ₹ 4,066 crore",
        );
        let metrics = run(&layout, false);
        assert_eq!(metrics.get(MetricKey::NiiCr), Some(10057.0));
        assert_eq!(metrics.get(MetricKey::PatCr), Some(4066.0));
    }
}
