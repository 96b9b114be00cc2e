//! Metrics computed from extracted balance sheet values.

use crate::models::{MetricKey, QuarterlyMetrics};

/// Rupees per crore.
const CRORE: f64 = 1e7;

/// Net worth, share count and book value per share.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub shares_outstanding: u64,
    pub net_worth_cr: f64,
    pub book_value_per_share: f64,
}

/// Derive per-share figures from share capital and reserves (both in crore).
///
/// Returns `None` unless share capital is positive and the face value is
/// non-zero. Book value uses the unrounded net worth and share count.
pub fn compute(share_capital_cr: f64, reserves_cr: f64, face_value: f64) -> Option<DerivedMetrics> {
    if share_capital_cr <= 0.0 || face_value == 0.0 {
        return None;
    }
    let shares = share_capital_cr * CRORE / face_value;
    let net_worth = share_capital_cr + reserves_cr;

    Some(DerivedMetrics {
        shares_outstanding: shares as u64,
        net_worth_cr: round_to(net_worth, 1),
        book_value_per_share: round_to(net_worth * CRORE / shares, 2),
    })
}

/// Fill the derived fields of `metrics` when their inputs are present.
pub fn apply(metrics: &mut QuarterlyMetrics, face_value: f64) {
    let (Some(share_capital), Some(reserves)) = (
        metrics.get(MetricKey::ShareCapitalCr),
        metrics.get(MetricKey::ReservesCr),
    ) else {
        return;
    };

    if let Some(derived) = compute(share_capital, reserves, face_value) {
        metrics.set(MetricKey::NetWorthCr, derived.net_worth_cr);
        metrics.set_shares_outstanding(derived.shares_outstanding);
        metrics.set(MetricKey::BookValuePerShare, derived.book_value_per_share);
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_book_value() {
        let derived = compute(500.0, 9500.0, 2.0).unwrap();
        assert_eq!(
            derived,
            DerivedMetrics {
                shares_outstanding: 2_500_000_000,
                net_worth_cr: 10000.0,
                book_value_per_share: 40.0,
            }
        );
    }

    #[test]
    fn test_rounding() {
        let derived = compute(123.45, 23876.07, 2.0).unwrap();
        assert_eq!(derived.net_worth_cr, 23999.5);
        assert_eq!(derived.shares_outstanding, 617_250_000);
        assert_eq!(derived.book_value_per_share, 388.81);
    }

    #[test]
    fn test_missing_inputs() {
        assert_eq!(compute(0.0, 9500.0, 2.0), None);
        assert_eq!(compute(500.0, 9500.0, 0.0), None);

        let mut metrics = QuarterlyMetrics::new();
        metrics.set(MetricKey::ShareCapitalCr, 500.0);
        apply(&mut metrics, 2.0);
        assert!(!metrics.is_set(MetricKey::BookValuePerShare));
        assert_eq!(metrics.shares_outstanding(), None);
    }

    #[test]
    fn test_apply_fills_fields() {
        let mut metrics = QuarterlyMetrics::new();
        metrics.set(MetricKey::ShareCapitalCr, 500.0);
        metrics.set(MetricKey::ReservesCr, 9500.0);
        apply(&mut metrics, 2.0);
        assert_eq!(metrics.get(MetricKey::NetWorthCr), Some(10000.0));
        assert_eq!(metrics.shares_outstanding(), Some(2_500_000_000));
        assert_eq!(metrics.get(MetricKey::BookValuePerShare), Some(40.0));
    }
}
