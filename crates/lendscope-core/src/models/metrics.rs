//! Per-quarter metric record with assign-once slots.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A value that can be written exactly once.
///
/// The first successful [`Slot::set`] wins; every later write is ignored.
/// Serializes as the inner value (or is skipped when empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slot<T>(Option<T>);

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> Slot<T> {
    /// Store `value` if the slot is empty. Returns whether it was stored.
    pub fn set(&mut self, value: T) -> bool {
        if self.0.is_some() {
            return false;
        }
        self.0 = Some(value);
        true
    }

    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_none()
    }
}

impl<T: Copy> Slot<T> {
    pub fn value(&self) -> Option<T> {
        self.0
    }
}

/// Numeric metrics addressable on [`QuarterlyMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKey {
    AumCr,
    NiiCr,
    NimPct,
    PatCr,
    GnpaPct,
    NnpaPct,
    RoaPct,
    RoePct,
    CarPct,
    DisbursementsCr,
    ShareCapitalCr,
    ReservesCr,
    NetWorthCr,
    BookValuePerShare,
}

impl MetricKey {
    /// Every numeric metric, in artifact order.
    pub const ALL: [MetricKey; 14] = [
        MetricKey::AumCr,
        MetricKey::NiiCr,
        MetricKey::NimPct,
        MetricKey::PatCr,
        MetricKey::GnpaPct,
        MetricKey::NnpaPct,
        MetricKey::RoaPct,
        MetricKey::RoePct,
        MetricKey::CarPct,
        MetricKey::DisbursementsCr,
        MetricKey::ShareCapitalCr,
        MetricKey::ReservesCr,
        MetricKey::NetWorthCr,
        MetricKey::BookValuePerShare,
    ];

    /// JSON field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::AumCr => "aum_cr",
            MetricKey::NiiCr => "nii_cr",
            MetricKey::NimPct => "nim_pct",
            MetricKey::PatCr => "pat_cr",
            MetricKey::GnpaPct => "gnpa_pct",
            MetricKey::NnpaPct => "nnpa_pct",
            MetricKey::RoaPct => "roa_pct",
            MetricKey::RoePct => "roe_pct",
            MetricKey::CarPct => "car_pct",
            MetricKey::DisbursementsCr => "disbursements_cr",
            MetricKey::ShareCapitalCr => "share_capital_cr",
            MetricKey::ReservesCr => "reserves_cr",
            MetricKey::NetWorthCr => "net_worth_cr",
            MetricKey::BookValuePerShare => "book_value_per_share",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics extracted from one investor presentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyMetrics {
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    aum_cr: Slot<f64>,
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    nii_cr: Slot<f64>,
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    nim_pct: Slot<f64>,
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    pat_cr: Slot<f64>,
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    gnpa_pct: Slot<f64>,
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    gnpa_note: Slot<String>,
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    nnpa_pct: Slot<f64>,
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    roa_pct: Slot<f64>,
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    roe_pct: Slot<f64>,
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    car_pct: Slot<f64>,
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    disbursements_cr: Slot<f64>,
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    share_capital_cr: Slot<f64>,
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    reserves_cr: Slot<f64>,
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    net_worth_cr: Slot<f64>,
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    shares_outstanding: Slot<u64>,
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    book_value_per_share: Slot<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filing_date: Option<NaiveDate>,
}

impl QuarterlyMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: MetricKey) -> &Slot<f64> {
        match key {
            MetricKey::AumCr => &self.aum_cr,
            MetricKey::NiiCr => &self.nii_cr,
            MetricKey::NimPct => &self.nim_pct,
            MetricKey::PatCr => &self.pat_cr,
            MetricKey::GnpaPct => &self.gnpa_pct,
            MetricKey::NnpaPct => &self.nnpa_pct,
            MetricKey::RoaPct => &self.roa_pct,
            MetricKey::RoePct => &self.roe_pct,
            MetricKey::CarPct => &self.car_pct,
            MetricKey::DisbursementsCr => &self.disbursements_cr,
            MetricKey::ShareCapitalCr => &self.share_capital_cr,
            MetricKey::ReservesCr => &self.reserves_cr,
            MetricKey::NetWorthCr => &self.net_worth_cr,
            MetricKey::BookValuePerShare => &self.book_value_per_share,
        }
    }

    fn slot_mut(&mut self, key: MetricKey) -> &mut Slot<f64> {
        match key {
            MetricKey::AumCr => &mut self.aum_cr,
            MetricKey::NiiCr => &mut self.nii_cr,
            MetricKey::NimPct => &mut self.nim_pct,
            MetricKey::PatCr => &mut self.pat_cr,
            MetricKey::GnpaPct => &mut self.gnpa_pct,
            MetricKey::NnpaPct => &mut self.nnpa_pct,
            MetricKey::RoaPct => &mut self.roa_pct,
            MetricKey::RoePct => &mut self.roe_pct,
            MetricKey::CarPct => &mut self.car_pct,
            MetricKey::DisbursementsCr => &mut self.disbursements_cr,
            MetricKey::ShareCapitalCr => &mut self.share_capital_cr,
            MetricKey::ReservesCr => &mut self.reserves_cr,
            MetricKey::NetWorthCr => &mut self.net_worth_cr,
            MetricKey::BookValuePerShare => &mut self.book_value_per_share,
        }
    }

    /// Current value of a metric.
    pub fn get(&self, key: MetricKey) -> Option<f64> {
        self.slot(key).value()
    }

    pub fn is_set(&self, key: MetricKey) -> bool {
        self.slot(key).is_set()
    }

    /// Assign a metric unless it already holds a value.
    pub fn set(&mut self, key: MetricKey, value: f64) -> bool {
        self.slot_mut(key).set(value)
    }

    /// Provenance note attached to the GNPA value, if it is a proxy.
    pub fn gnpa_note(&self) -> Option<&str> {
        self.gnpa_note.get().map(String::as_str)
    }

    /// Assign GNPA from a proxy measure together with its provenance note.
    pub fn set_gnpa_proxy(&mut self, value: f64, note: impl Into<String>) -> bool {
        if !self.gnpa_pct.set(value) {
            return false;
        }
        self.gnpa_note.set(note.into());
        true
    }

    pub fn shares_outstanding(&self) -> Option<u64> {
        self.shares_outstanding.value()
    }

    pub fn set_shares_outstanding(&mut self, shares: u64) -> bool {
        self.shares_outstanding.set(shares)
    }

    pub fn filing_date(&self) -> Option<NaiveDate> {
        self.filing_date
    }

    /// Stamp the record with the date of the filing it came from.
    pub fn with_filing_date(mut self, date: NaiveDate) -> Self {
        self.filing_date = Some(date);
        self
    }

    /// Number of numeric metrics that hold a value.
    pub fn populated(&self) -> usize {
        MetricKey::ALL.iter().filter(|k| self.is_set(**k)).count()
    }
}
