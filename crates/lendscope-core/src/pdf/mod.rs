//! PDF processing module.

mod extractor;
pub mod layout;

pub use extractor::PdfExtractor;
pub use layout::{find_deck_start, tokenize};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A word with its bounding box in layout units (origin top-left).
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            text: text.into(),
            x0,
            y0,
            x1,
            y1,
        }
    }

    pub fn x_mid(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    pub fn y_mid(&self) -> f64 {
        (self.y0 + self.y1) / 2.0
    }
}

/// A word reduced to its text and horizontal midpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub x: f64,
}

/// Words sharing a vertical bucket, ordered left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub tokens: Vec<Token>,
}

impl Row {
    /// Row text with words separated by single spaces.
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Tokenized content of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    /// Page index (0-based).
    pub index: usize,
    /// Raw page text.
    pub text: String,
    /// Rows ordered top to bottom.
    pub rows: Vec<Row>,
}

impl PageLayout {
    /// Replace the page text, e.g. with a better-spaced rendering.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// Turns document bytes into tokenized pages.
pub trait DeckReader: Send + Sync {
    /// Read every page of the document. Unreadable pages come back empty.
    fn read_pages(&self, data: &[u8]) -> Result<Vec<PageLayout>>;
}
