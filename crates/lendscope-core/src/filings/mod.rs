//! Filing discovery and document retrieval.

pub mod bse;
pub mod dedup;
pub mod fetcher;

pub use bse::BseClient;
pub use dedup::latest_per_month;
pub use fetcher::AttachmentFetcher;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::FilingRecord;

/// Lists a company's investor-presentation filings.
#[async_trait]
pub trait FilingSource: Send + Sync {
    /// Filings published since January 1st of `from_year`, newest first.
    async fn list_filings(&self, bse_code: &str, from_year: i32) -> Result<Vec<FilingRecord>>;
}

/// Retrieves filing attachments.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Attachment bytes, or `None` when no location serves a PDF.
    async fn fetch(&self, attachment: &str) -> Option<Vec<u8>>;
}
