//! Assets under management.
//!
//! The headline AUM figure is reliably the largest amount on its highlights
//! page, so every plausible amount is collected and the maximum wins.

use std::borrow::Cow;

use tracing::debug;

use super::narrative::{window_before, LAKH_CRORE_SCALE};
use super::numbers::{parse_number, strictly_within};
use super::patterns::{AUM_LABEL, CRORE_AMOUNT, INLINE_RUPEE, LAKH_CRORE, MILESTONE_CONTEXT, RS_CRORE};
use crate::metrics::cascade::{PageContext, PageRule};
use crate::models::{MetricKey, QuarterlyMetrics};

/// Page phrases that make a page worth scanning.
const AUM_KEYWORDS: &[&str] = &[
    "AUM",
    "Assets Under Management",
    "Loan Book",
    "Gross Loan Book",
    "Loan AUM",
    "Business AUM",
    "Retail Book",
];

/// Segments ignored for lending-only companies.
const NON_LENDING_SEGMENTS: &[&str] = &["Housing", "Wealth", "Insurance", "AMC", "Broking"];

/// Plausible AUM range in crore (exclusive).
const AUM_RANGE: (f64, f64) = (5_000.0, 800_000.0);

/// Characters before a lakh crore mention checked for milestone wording.
const MILESTONE_LOOKBACK: usize = 80;

/// AUM as the maximum candidate amount on the first qualifying page.
#[derive(Debug, Default)]
pub struct AumRule;

impl AumRule {
    pub fn new() -> Self {
        Self
    }
}

impl PageRule for AumRule {
    fn name(&self) -> &'static str {
        "aum"
    }

    fn apply(&self, page: &PageContext<'_>, metrics: &mut QuarterlyMetrics) {
        if metrics.is_set(MetricKey::AumCr) {
            return;
        }
        if !AUM_KEYWORDS.iter().any(|kw| page.text.contains(kw)) || !AUM_LABEL.is_match(page.text) {
            return;
        }

        let candidates = aum_candidates(page);
        if let Some(aum) = largest(&candidates) {
            debug!("AUM {} from {} candidates", aum, candidates.len());
            metrics.set(MetricKey::AumCr, aum);
        }
    }
}

/// Largest candidate, if any.
pub fn largest(candidates: &[f64]) -> Option<f64> {
    candidates.iter().copied().reduce(f64::max)
}

fn is_segment_line(text: &str) -> bool {
    NON_LENDING_SEGMENTS.iter().any(|kw| text.contains(kw))
}

/// Page text without non-lending segment lines when the company is lending-only.
fn lending_text<'a>(page: &PageContext<'a>) -> Cow<'a, str> {
    if !page.lending_only {
        return Cow::Borrowed(page.text);
    }
    Cow::Owned(
        page.text
            .lines()
            .filter(|line| !is_segment_line(line))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Every amount on the page that could be the headline AUM.
pub fn aum_candidates(page: &PageContext<'_>) -> Vec<f64> {
    let (lo, hi) = AUM_RANGE;
    let text = lending_text(page);
    let mut candidates = Vec::new();

    // Lakh crore mentions, unless they describe a milestone
    for caps in LAKH_CRORE.captures_iter(&text) {
        let Some(found) = caps.get(0) else { continue };
        let context = window_before(&text, found.start(), MILESTONE_LOOKBACK);
        if MILESTONE_CONTEXT.is_match(context) {
            continue;
        }
        let scaled = parse_number(&caps[1]).map(|v| (v * LAKH_CRORE_SCALE).round());
        if let Some(v) = scaled.filter(|v| strictly_within(*v, lo, hi)) {
            candidates.push(v);
        }
    }

    // "₹55,017" or "₹" followed by a number token
    for (row, row_text) in page.rows() {
        if page.lending_only && is_segment_line(row_text) {
            continue;
        }
        for (j, token) in row.tokens.iter().enumerate() {
            let number = if INLINE_RUPEE.is_match(&token.text) {
                token.text.as_str()
            } else if token.text == "₹" {
                row.tokens.get(j + 1).map(|t| t.text.as_str()).unwrap_or("")
            } else {
                continue;
            };
            if let Some(v) = parse_number(number).filter(|v| strictly_within(*v, lo, hi)) {
                candidates.push(v);
            }
        }
    }

    // "Rs.2,10,722 Cr" and plain "2,10,722 crore"
    for pattern in [&*RS_CRORE, &*CRORE_AMOUNT] {
        candidates.extend(
            pattern
                .captures_iter(&text)
                .filter_map(|c| parse_number(&c[1]))
                .filter(|v| strictly_within(*v, lo, hi)),
        );
    }

    candidates
}
