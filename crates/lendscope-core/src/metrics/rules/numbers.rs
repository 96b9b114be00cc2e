//! Numeric normalization for presentation text.

use super::patterns::{DECIMAL, NUMERIC_WORD, PLAIN_NUMBER};

/// Parse a presentation number.
///
/// Strips thousands separators, the rupee sign, percent signs and
/// surrounding whitespace. A parenthesised value is negative.
///
/// ```
/// use lendscope_core::metrics::rules::parse_number;
///
/// assert_eq!(parse_number("(1,234)"), Some(-1234.0));
/// assert_eq!(parse_number("₹4,066"), Some(4066.0));
/// assert_eq!(parse_number("n/a"), None);
/// ```
pub fn parse_number(s: &str) -> Option<f64> {
    let cleaned = s
        .replace([',', '₹', '%'], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Whether a token looks like a table number (`1,234`, `(56)`, `-12.5`).
pub fn is_numeric_word(word: &str) -> bool {
    NUMERIC_WORD.is_match(word) && word.chars().any(|c| c.is_ascii_digit())
}

/// Every `d+.d+` decimal in `text`, in order of appearance.
pub fn decimals_in(text: &str) -> Vec<f64> {
    DECIMAL
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Decimals strictly between `lo` and `hi`.
pub fn percentages_in(text: &str, lo: f64, hi: f64) -> Vec<f64> {
    decimals_in(text)
        .into_iter()
        .filter(|v| *v > lo && *v < hi)
        .collect()
}

/// First number in `text` within `[lo, hi]`.
pub fn first_number_in_range(text: &str, lo: f64, hi: f64) -> Option<f64> {
    PLAIN_NUMBER
        .find_iter(text)
        .filter_map(|m| parse_number(m.as_str()))
        .find(|v| (lo..=hi).contains(v))
}

/// Whether `v` lies strictly inside `(lo, hi)`.
pub(crate) fn strictly_within(v: f64, lo: f64, hi: f64) -> bool {
    v > lo && v < hi
}
