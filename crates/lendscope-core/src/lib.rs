//! Core library for NBFC investor-presentation metric extraction.
//!
//! This crate provides:
//! - Filing discovery against the BSE announcement API
//! - Attachment download with archive fallback and a local cache
//! - PDF word extraction and row/column layout reconstruction
//! - Lender metric extraction (AUM, NII, PAT, asset quality, ratios, net worth)
//! - Per-company quarterly reports persisted as JSON

pub mod error;
pub mod filings;
pub mod metrics;
pub mod models;
pub mod pdf;
pub mod pipeline;

pub use error::{DiscoveryError, LendscopeError, PdfError, Result};
pub use filings::{AttachmentFetcher, BseClient, DocumentSource, FilingSource};
pub use metrics::{DeckParser, PageRule};
pub use models::{
    CompanyProfile, CompanyQuarterlyReport, FilingRecord, MetricKey, PipelineConfig, QuarterlyMetrics,
};
pub use pdf::{DeckReader, PageLayout, PdfExtractor};
pub use pipeline::{Pipeline, RosterOutcome};
