//! Percentage ratios read from labelled rows.

use super::patterns::{
    ANNUALISED, CAR_PAGE, CAR_ROW, NIM_PAGE, NIM_ROW, ROA_PAGE, ROA_ROW, ROE_PAGE, ROE_ROW,
};
use crate::metrics::cascade::{Cascade, RowTier};
use crate::models::MetricKey;

/// Net interest margin, (1, 20).
pub fn nim() -> Cascade {
    Cascade::new(MetricKey::NimPct, &NIM_PAGE).with_tier(RowTier::new(&NIM_ROW, 1.0, 20.0))
}

/// Return on assets, (0, 10). Annualised variants are skipped.
pub fn roa() -> Cascade {
    Cascade::new(MetricKey::RoaPct, &ROA_PAGE)
        .with_tier(RowTier::new(&ROA_ROW, 0.0, 10.0).excluding(&ANNUALISED))
}

/// Return on equity, (0, 80).
pub fn roe() -> Cascade {
    Cascade::new(MetricKey::RoePct, &ROE_PAGE).with_tier(RowTier::new(&ROE_ROW, 0.0, 80.0))
}

/// Capital adequacy, (10, 60).
pub fn car() -> Cascade {
    Cascade::new(MetricKey::CarPct, &CAR_PAGE).with_tier(RowTier::new(&CAR_ROW, 10.0, 60.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::cascade::tests::page;
    use crate::metrics::cascade::{PageContext, PageRule};
    use crate::models::QuarterlyMetrics;

    #[test]
    fn test_ratio_rows() {
        let layout = page(
            0,
            &[
                (80.0, &[("Key", 10.0), ("Ratios", 50.0), ("Q3FY25", 300.0), ("Q3FY26", 400.0)]),
                (120.0, &[("NIM", 10.0), ("9.80", 300.0), ("10.12", 400.0)]),
                (160.0, &[("RoA", 10.0), ("4.10", 300.0), ("4.25", 400.0)]),
                (200.0, &[("RoE", 10.0), ("19.20", 300.0), ("19.55", 400.0)]),
                (240.0, &[("CRAR", 10.0), ("(%)", 50.0), ("21.40", 300.0), ("20.90", 400.0)]),
            ],
        );
        let ctx = PageContext::new(&layout, false);
        let mut metrics = QuarterlyMetrics::new();
        for rule in [nim(), roa(), roe(), car()] {
            rule.apply(&ctx, &mut metrics);
        }

        assert_eq!(metrics.get(MetricKey::NimPct), Some(10.12));
        assert_eq!(metrics.get(MetricKey::RoaPct), Some(4.25));
        assert_eq!(metrics.get(MetricKey::RoePct), Some(19.55));
        assert_eq!(metrics.get(MetricKey::CarPct), Some(20.90));
    }

    #[test]
    fn test_out_of_range_values_ignored() {
        let layout = page(0, &[(100.0, &[("CRAR", 10.0), ("8.50", 300.0), ("64.00", 400.0)])]);
        let mut metrics = QuarterlyMetrics::new();
        car().apply(&PageContext::new(&layout, false), &mut metrics);
        assert!(!metrics.is_set(MetricKey::CarPct));
    }
}
