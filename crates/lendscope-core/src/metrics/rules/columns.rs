//! Column header detection and nearest-column assignment.

use crate::pdf::{Row, Token};

use super::numbers::{is_numeric_word, parse_number};
use super::patterns::{MONTH_DATE, MONTH_WORD, QUARTER_LABEL};

/// Find the x positions of a table's column headers.
///
/// The first row carrying at least two quarter labels (`Q3FY26`) or two
/// month headers (`Dec`, `Jun-25`) wins. Returns positions sorted left to right.
pub fn locate_columns(rows: &[Row]) -> Option<Vec<f64>> {
    for row in rows {
        if QUARTER_LABEL.is_match(&row.text()) {
            let xs = sorted(
                row.tokens
                    .iter()
                    .filter(|t| QUARTER_LABEL.is_match(&t.text))
                    .map(|t| t.x),
            );
            if xs.len() >= 2 {
                return Some(xs);
            }
        }

        let xs = sorted(
            row.tokens
                .iter()
                .filter(|t| MONTH_WORD.is_match(&t.text) || MONTH_DATE.is_match(&t.text))
                .map(|t| t.x),
        );
        if xs.len() >= 2 {
            return Some(xs);
        }
    }
    None
}

/// Number of quarter-label tokens anywhere on the page.
pub fn count_quarter_labels(rows: &[Row]) -> usize {
    rows.iter()
        .flat_map(|r| r.tokens.iter())
        .filter(|t| QUARTER_LABEL.is_match(&t.text))
        .count()
}

/// Tokens of a row that look like table numbers.
pub fn numeric_tokens(row: &Row) -> Vec<&Token> {
    row.tokens
        .iter()
        .filter(|t| is_numeric_word(&t.text))
        .collect()
}

/// Assign each token to the column with the nearest x and parse per column.
///
/// Ties go to the lower index. Tokens landing in the same column are
/// concatenated before parsing, so a split `1,2` `34` still reads as 1234.
pub fn assign_to_columns(tokens: &[&Token], cols: &[f64]) -> Vec<Option<f64>> {
    let mut buckets = vec![String::new(); cols.len()];
    for token in tokens {
        if let Some(best) = nearest_column(token.x, cols) {
            buckets[best].push_str(&token.text);
        }
    }
    buckets.iter().map(|b| parse_number(b)).collect()
}

fn nearest_column(x: f64, cols: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, col) in cols.iter().enumerate() {
        let distance = (x - col).abs();
        match best {
            Some((_, d)) if d <= distance => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}

fn sorted(xs: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut xs: Vec<f64> = xs.collect();
    xs.sort_by(|a, b| a.total_cmp(b));
    xs
}

/// Which column of a located table holds the value of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPick {
    /// The rightmost column.
    Last,
    /// The third column on wide quarterly tables (four or more quarter
    /// labels on the page), otherwise the rightmost column.
    CurrentQuarter,
}

impl ColumnPick {
    /// Column index for a table of `columns` columns.
    pub fn index(&self, columns: usize, quarter_labels: usize) -> Option<usize> {
        let last = columns.checked_sub(1)?;
        match self {
            ColumnPick::CurrentQuarter if quarter_labels >= 4 => Some(2.min(last)),
            _ => Some(last),
        }
    }

    /// Pick from already assigned column values.
    pub fn pick(&self, values: &[Option<f64>], quarter_labels: usize) -> Option<f64> {
        self.index(values.len(), quarter_labels)
            .and_then(|i| values.get(i).copied().flatten())
    }
}
