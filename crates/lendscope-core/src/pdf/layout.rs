//! Row clustering and deck-start detection.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use super::{PageLayout, Row, Token, Word};

/// Default vertical tolerance for grouping words into rows.
pub const DEFAULT_Y_TOLERANCE: f64 = 8.0;

/// Phrases that mark the first slide of an investor deck.
const DECK_MARKERS: &[&str] = &[
    "Investor Update",
    "Investor Presentation",
    "Financial Highlights",
    "Key Highlights",
];

lazy_static! {
    static ref SPACED_QUARTER: Regex = Regex::new(r"\bQ[1-4] FY\d{2}\b").unwrap();
}

/// Group words into rows by rounding their vertical midpoint to `y_tolerance`.
///
/// Halves round to even, so a midpoint of exactly 100 with tolerance 8
/// joins the bucket at 96. Rows come back top to bottom, tokens left to right. The page text is the
/// rows joined by newlines.
pub fn tokenize(index: usize, words: &[Word], y_tolerance: f64) -> PageLayout {
    let tol = if y_tolerance > 0.0 {
        y_tolerance
    } else {
        DEFAULT_Y_TOLERANCE
    };

    let mut buckets: BTreeMap<i64, Vec<Token>> = BTreeMap::new();
    for word in words {
        if word.text.trim().is_empty() {
            continue;
        }
        let key = (word.y_mid() / tol).round_ties_even() as i64;
        buckets.entry(key).or_default().push(Token {
            text: word.text.clone(),
            x: word.x_mid(),
        });
    }

    let rows: Vec<Row> = buckets
        .into_values()
        .map(|mut tokens| {
            tokens.sort_by(|a, b| a.x.total_cmp(&b.x));
            Row { tokens }
        })
        .collect();

    let text = rows.iter().map(Row::text).collect::<Vec<_>>().join("\n");

    PageLayout { index, text, rows }
}

/// Index of the first page that looks like part of the slide deck.
///
/// Some filings prepend statutory statements before the presentation; the
/// deck starts at the first page carrying a marker phrase or a quarter label.
pub fn find_deck_start(pages: &[PageLayout]) -> usize {
    pages
        .iter()
        .position(|p| {
            DECK_MARKERS.iter().any(|m| p.text.contains(m)) || SPACED_QUARTER.is_match(&p.text)
        })
        .unwrap_or(0)
}
