//! Keyword-anchored amount search over free page text.

use regex::Regex;
use tracing::trace;

use super::numbers::parse_number;
use super::patterns::{CRORE_AMOUNT, LAKH_CRORE, NARRATIVE_AMOUNT};

/// Characters inspected after each keyword match.
pub const NARRATIVE_WINDOW: usize = 250;

/// Crore per lakh crore.
pub const LAKH_CRORE_SCALE: f64 = 1e5;

/// First amount (in crore) within `[lo, hi]` following any of `keywords`.
///
/// Keywords are tried in order; for each match the window after it is
/// searched for a currency amount, then for any `<number> Cr` mention.
pub fn find_value(text: &str, keywords: &[Regex], lo: f64, hi: f64) -> Option<f64> {
    let accept = |v: f64| v != 0.0 && v >= lo && v <= hi;

    for keyword in keywords {
        for found in keyword.find_iter(text) {
            let snippet = window_after(text, found.start(), NARRATIVE_WINDOW);

            if let Some(v) = parse_amount(snippet).filter(|v| accept(*v)) {
                trace!("Narrative '{}' matched currency amount {}", found.as_str(), v);
                return Some(v);
            }

            let plain = CRORE_AMOUNT
                .captures_iter(snippet)
                .filter_map(|c| parse_number(&c[1]))
                .find(|v| accept(*v));
            if let Some(v) = plain {
                trace!("Narrative '{}' matched crore mention {}", found.as_str(), v);
                return Some(v);
            }
        }
    }
    None
}

/// First currency amount in `snippet`, in crore.
///
/// `₹1.2 lakh crore` is scaled to crore and rounded; otherwise the first
/// `₹/Rs <number> Cr` mention is returned as is.
pub fn parse_amount(snippet: &str) -> Option<f64> {
    if let Some(caps) = LAKH_CRORE.captures(snippet) {
        if let Some(v) = parse_number(&caps[1]).filter(|v| *v != 0.0) {
            return Some((v * LAKH_CRORE_SCALE).round());
        }
    }
    NARRATIVE_AMOUNT
        .captures(snippet)
        .and_then(|caps| parse_number(&caps[1]))
}

/// Up to `chars` characters of `text` starting at byte offset `start`.
pub(crate) fn window_after(text: &str, start: usize, chars: usize) -> &str {
    let tail = &text[start..];
    let end = tail
        .char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(tail.len());
    &tail[..end]
}

/// Up to `chars` characters of `text` ending at byte offset `end`.
pub(crate) fn window_before(text: &str, end: usize, chars: usize) -> &str {
    let head = &text[..end];
    let start = head
        .char_indices()
        .rev()
        .nth(chars.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    if chars == 0 { "" } else { &head[start..] }
}
