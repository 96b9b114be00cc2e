//! Error types for the lendscope-core library.

use thiserror::Error;

/// Main error type for the lendscope library.
#[derive(Error, Debug)]
pub enum LendscopeError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Filing discovery error.
    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The requested company is not part of the roster.
    #[error("unknown company '{key}' (known: {known})")]
    UnknownCompany { key: String, known: String },
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while talking to the filing repository.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// The session warm-up request failed.
    #[error("session setup failed for {code}: {reason}")]
    Session { code: String, reason: String },
}

/// Result type for the lendscope library.
pub type Result<T> = std::result::Result<T, LendscopeError>;
