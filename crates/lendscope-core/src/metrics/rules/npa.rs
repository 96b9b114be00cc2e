//! Gross and net non-performing asset ratios.

use regex::Regex;
use tracing::debug;

use super::numbers::{decimals_in, strictly_within};
use super::patterns::{
    COMBINED_NPA, GNPA_NARRATIVE, GROSS_NPA_ROW, NET_NPA_ROW, NNPA_NARRATIVE, STAGE3_QUALIFIER,
};
use crate::metrics::cascade::{PageContext, PageRule};
use crate::models::{MetricKey, QuarterlyMetrics};

/// Provenance note stored when GNPA comes from the Stage 3 ratio.
pub const STAGE3_NOTE: &str = "Stage 3 ratio";

const NPA_RANGE: (f64, f64) = (0.0, 20.0);

/// GNPA and NNPA from labelled rows, narrative, then a Stage 3 proxy.
#[derive(Debug, Default)]
pub struct NpaRule;

impl NpaRule {
    pub fn new() -> Self {
        Self
    }
}

impl PageRule for NpaRule {
    fn name(&self) -> &'static str {
        "npa"
    }

    fn apply(&self, page: &PageContext<'_>, metrics: &mut QuarterlyMetrics) {
        if metrics.is_set(MetricKey::GnpaPct) && metrics.is_set(MetricKey::NnpaPct) {
            return;
        }

        // Labelled rows: last decimal, no range check
        for (_, text) in page.rows() {
            if GROSS_NPA_ROW.is_match(text) {
                if let Some(v) = decimals_in(text).last() {
                    metrics.set(MetricKey::GnpaPct, *v);
                }
            }
            if NET_NPA_ROW.is_match(text) {
                if let Some(v) = decimals_in(text).last() {
                    metrics.set(MetricKey::NnpaPct, *v);
                }
            }
        }

        // "GNPA & NNPA at 1.21% & 0.47%"
        if !metrics.is_set(MetricKey::GnpaPct) || !metrics.is_set(MetricKey::NnpaPct) {
            if let Some(caps) = COMBINED_NPA.captures(page.text) {
                let gross = caps[1].parse::<f64>().ok().filter(|v| in_range(*v));
                let net = caps[2].parse::<f64>().ok().filter(|v| in_range(*v));
                if let Some(v) = gross {
                    metrics.set(MetricKey::GnpaPct, v);
                }
                if let Some(v) = net {
                    metrics.set(MetricKey::NnpaPct, v);
                }
            }
        }

        if !metrics.is_set(MetricKey::GnpaPct) {
            if let Some(v) = first_keyword_value(page.text, &GNPA_NARRATIVE) {
                metrics.set(MetricKey::GnpaPct, v);
            }
        }
        if !metrics.is_set(MetricKey::NnpaPct) {
            if let Some(v) = first_keyword_value(page.text, &NNPA_NARRATIVE) {
                metrics.set(MetricKey::NnpaPct, v);
            }
        }

        if !metrics.is_set(MetricKey::GnpaPct) {
            if let Some(v) = stage3_ratio(page) {
                debug!("GNPA from Stage 3 proxy: {}", v);
                metrics.set_gnpa_proxy(v, STAGE3_NOTE);
            }
        }
    }
}

fn in_range(v: f64) -> bool {
    strictly_within(v, NPA_RANGE.0, NPA_RANGE.1)
}

/// The first pattern that matches decides; its value must be in range.
fn first_keyword_value(text: &str, patterns: &[Regex]) -> Option<f64> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            let value = caps[1].parse::<f64>().ok().filter(|v| in_range(*v));
            if value.is_some() {
                return value;
            }
        }
    }
    None
}

/// Last decimal of the first Stage 3 ratio row.
fn stage3_ratio(page: &PageContext<'_>) -> Option<f64> {
    page.rows()
        .filter(|(_, text)| text.contains("Stage 3") && STAGE3_QUALIFIER.is_match(text))
        .find_map(|(_, text)| decimals_in(text).last().copied().filter(|v| in_range(*v)))
}
