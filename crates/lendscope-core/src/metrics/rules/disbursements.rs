//! Quarterly disbursements.

use super::patterns::{DISBURSEMENT_KEYWORDS, DISBURSEMENT_PAGE};
use crate::metrics::cascade::{Cascade, NarrativeTier};
use crate::models::MetricKey;

/// Disbursements in crore, narrative only, [500, 500000].
pub fn disbursements() -> Cascade {
    Cascade::new(MetricKey::DisbursementsCr, &DISBURSEMENT_PAGE)
        .with_tier(NarrativeTier::new(&DISBURSEMENT_KEYWORDS, 500.0, 500_000.0))
}
