//! Tiered extraction strategies.
//!
//! Each metric is resolved by an ordered list of [`Tier`]s: structured
//! table lookup, labelled row scan, then narrative search. A [`Cascade`]
//! runs its tiers in order and stops at the first value. Rules that fill
//! several metrics at once implement [`PageRule`] directly.

use regex::Regex;
use tracing::trace;

use super::rules::columns::{
    assign_to_columns, count_quarter_labels, locate_columns, numeric_tokens, ColumnPick,
};
use super::rules::narrative;
use super::rules::numbers::percentages_in;
use crate::models::{MetricKey, QuarterlyMetrics};
use crate::pdf::{PageLayout, Row};

/// Per-page view shared by every rule.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    /// Rows ordered top to bottom.
    pub rows: &'a [Row],
    /// Space-joined text of each row, parallel to `rows`.
    pub row_texts: Vec<String>,
    /// Full page text.
    pub text: &'a str,
    /// Column header positions, if the page carries a table.
    pub columns: Option<Vec<f64>>,
    /// Number of quarter-label tokens on the page.
    pub quarter_labels: usize,
    /// Skip rows about non-lending segments.
    pub lending_only: bool,
}

impl<'a> PageContext<'a> {
    pub fn new(page: &'a PageLayout, lending_only: bool) -> Self {
        Self {
            rows: &page.rows,
            row_texts: page.rows.iter().map(Row::text).collect(),
            text: &page.text,
            columns: locate_columns(&page.rows),
            quarter_labels: count_quarter_labels(&page.rows),
            lending_only,
        }
    }

    /// Rows paired with their text.
    pub fn rows(&self) -> impl Iterator<Item = (&'a Row, &str)> + '_ {
        self.rows
            .iter()
            .zip(self.row_texts.iter().map(String::as_str))
    }
}

/// One way of finding a single metric value on a page.
pub trait Tier: Send + Sync {
    fn attempt(&self, page: &PageContext<'_>) -> Option<f64>;
}

/// A rule that may write one or more metrics from a page.
pub trait PageRule: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Inspect the page and fill any metric still unset.
    fn apply(&self, page: &PageContext<'_>, metrics: &mut QuarterlyMetrics);
}

/// Ordered tiers for one metric behind a page-level gate.
pub struct Cascade {
    key: MetricKey,
    gate: &'static Regex,
    tiers: Vec<Box<dyn Tier>>,
}

impl Cascade {
    pub fn new(key: MetricKey, gate: &'static Regex) -> Self {
        Self {
            key,
            gate,
            tiers: Vec::new(),
        }
    }

    /// Append a lower-priority tier.
    pub fn with_tier(mut self, tier: impl Tier + 'static) -> Self {
        self.tiers.push(Box::new(tier));
        self
    }

    pub fn key(&self) -> MetricKey {
        self.key
    }

    /// Value of the first tier that resolves on this page.
    pub fn resolve(&self, page: &PageContext<'_>) -> Option<f64> {
        if !self.gate.is_match(page.text) {
            return None;
        }
        self.tiers.iter().find_map(|tier| tier.attempt(page))
    }
}

impl PageRule for Cascade {
    fn name(&self) -> &'static str {
        self.key.as_str()
    }

    fn apply(&self, page: &PageContext<'_>, metrics: &mut QuarterlyMetrics) {
        if metrics.is_set(self.key) {
            return;
        }
        if let Some(value) = self.resolve(page) {
            trace!("{} = {} (page {})", self.key, value, page_hint(page));
            metrics.set(self.key, value);
        }
    }
}

fn page_hint(page: &PageContext<'_>) -> String {
    page.row_texts.first().cloned().unwrap_or_default()
}

/// Structured table lookup: value from a column of a label-matched row.
///
/// Every regex in `labels` must match the row. The first row with a
/// non-zero value in the picked column wins.
pub struct TableTier {
    labels: Vec<&'static Regex>,
    pick: ColumnPick,
}

impl TableTier {
    pub fn new(labels: Vec<&'static Regex>, pick: ColumnPick) -> Self {
        Self { labels, pick }
    }
}

impl Tier for TableTier {
    fn attempt(&self, page: &PageContext<'_>) -> Option<f64> {
        let cols = page.columns.as_ref()?;
        page.rows().find_map(|(row, text)| {
            if !self.labels.iter().all(|l| l.is_match(text)) {
                return None;
            }
            let nums = numeric_tokens(row);
            if nums.is_empty() {
                return None;
            }
            let values = assign_to_columns(&nums, cols);
            self.pick
                .pick(&values, page.quarter_labels)
                .filter(|v| *v != 0.0)
        })
    }
}

/// Labelled row scan: last decimal strictly inside the range.
///
/// When several rows match, the last one on the page wins.
pub struct RowTier {
    label: &'static Regex,
    exclude: Option<&'static Regex>,
    lo: f64,
    hi: f64,
}

impl RowTier {
    pub fn new(label: &'static Regex, lo: f64, hi: f64) -> Self {
        Self {
            label,
            exclude: None,
            lo,
            hi,
        }
    }

    /// Skip rows matching `exclude`.
    pub fn excluding(mut self, exclude: &'static Regex) -> Self {
        self.exclude = Some(exclude);
        self
    }
}

impl Tier for RowTier {
    fn attempt(&self, page: &PageContext<'_>) -> Option<f64> {
        page.rows()
            .filter(|(_, text)| self.label.is_match(text))
            .filter(|(_, text)| !self.exclude.is_some_and(|e| e.is_match(text)))
            .filter_map(|(_, text)| percentages_in(text, self.lo, self.hi).last().copied())
            .last()
    }
}

/// Narrative search over the page text.
pub struct NarrativeTier {
    keywords: &'static [Regex],
    lo: f64,
    hi: f64,
}

impl NarrativeTier {
    pub fn new(keywords: &'static [Regex], lo: f64, hi: f64) -> Self {
        Self { keywords, lo, hi }
    }
}

impl Tier for NarrativeTier {
    fn attempt(&self, page: &PageContext<'_>) -> Option<f64> {
        narrative::find_value(page.text, self.keywords, self.lo, self.hi)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::metrics::rules::patterns::{
        ANNUALISED, NIM_PAGE, NIM_ROW, ROA_PAGE, ROA_ROW, SHARE_CAPITAL_ROW,
    };
    use crate::pdf::{tokenize, Word};

    /// Build a page from `(y, [(text, x_mid)])` rows.
    pub(crate) fn page(index: usize, rows: &[(f64, &[(&str, f64)])]) -> PageLayout {
        let words: Vec<Word> = rows
            .iter()
            .flat_map(|(y, tokens)| {
                tokens
                    .iter()
                    .map(move |(text, x)| Word::new(*text, x - 5.0, y - 4.0, x + 5.0, y + 4.0))
            })
            .collect();
        tokenize(index, &words, 8.0)
    }

    #[test]
    fn test_row_tier_last_row_wins() {
        let layout = page(
            0,
            &[
                (100.0, &[("NIM", 10.0), ("7.80", 200.0), ("8.10", 300.0)]),
                (140.0, &[("NIMs", 10.0), ("8.45", 200.0), ("25.00", 300.0)]),
            ],
        );
        let ctx = PageContext::new(&layout, false);
        assert_eq!(RowTier::new(&NIM_ROW, 1.0, 20.0).attempt(&ctx), Some(8.45));
    }

    #[test]
    fn test_row_tier_exclusion() {
        let layout = page(
            0,
            &[
                (100.0, &[("RoA", 10.0), ("2.40", 200.0)]),
                (140.0, &[("RoA", 10.0), ("(annualised)", 60.0), ("3.10", 200.0)]),
            ],
        );
        let ctx = PageContext::new(&layout, false);
        let tier = RowTier::new(&ROA_ROW, 0.0, 10.0).excluding(&ANNUALISED);
        assert_eq!(tier.attempt(&ctx), Some(2.40));
    }

    #[test]
    fn test_cascade_is_assign_once() {
        let cascade = Cascade::new(MetricKey::NimPct, &NIM_PAGE).with_tier(RowTier::new(&NIM_ROW, 1.0, 20.0));
        let first = page(0, &[(100.0, &[("NIM", 10.0), ("8.10", 200.0)])]);
        let second = page(1, &[(100.0, &[("NIM", 10.0), ("9.90", 200.0)])]);

        let mut metrics = QuarterlyMetrics::new();
        cascade.apply(&PageContext::new(&first, false), &mut metrics);
        cascade.apply(&PageContext::new(&second, false), &mut metrics);
        assert_eq!(metrics.get(MetricKey::NimPct), Some(8.10));
    }

    #[test]
    fn test_cascade_gate_blocks_page() {
        let cascade = Cascade::new(MetricKey::RoaPct, &ROA_PAGE).with_tier(RowTier::new(&ROA_ROW, 0.0, 10.0));
        let layout = page(0, &[(100.0, &[("roa", 10.0), ("2.40", 200.0)])]);
        assert_eq!(cascade.resolve(&PageContext::new(&layout, false)), None);
    }

    #[test]
    fn test_table_tier_picks_last_column() {
        let layout = page(
            0,
            &[
                (80.0, &[("Particulars", 20.0), ("Mar-25", 300.0), ("Sep-25", 400.0)]),
                (120.0, &[("Equity", 20.0), ("Share", 60.0), ("Capital", 100.0), ("1,234", 300.0), ("1,240", 400.0)]),
            ],
        );
        let ctx = PageContext::new(&layout, false);
        let tier = TableTier::new(vec![&SHARE_CAPITAL_ROW], ColumnPick::Last);
        assert_eq!(tier.attempt(&ctx), Some(1240.0));
    }
}
