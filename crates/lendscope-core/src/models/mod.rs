//! Data models for companies, filings, extracted metrics and reports.

pub mod company;
pub mod config;
pub mod filing;
pub mod metrics;
pub mod report;

pub use company::CompanyProfile;
pub use config::{DiscoveryConfig, PipelineConfig, StorageConfig};
pub use filing::FilingRecord;
pub use metrics::{MetricKey, QuarterlyMetrics, Slot};
pub use report::CompanyQuarterlyReport;
