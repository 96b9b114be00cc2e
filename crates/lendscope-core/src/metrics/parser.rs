//! Per-document driver running every rule over every deck page.

use tracing::{debug, info};

use super::cascade::{PageContext, PageRule};
use super::derived;
use super::rules::default_rules;
use crate::models::{CompanyProfile, QuarterlyMetrics};
use crate::pdf::{find_deck_start, PageLayout};

/// Investor presentation parser.
pub struct DeckParser {
    rules: Vec<Box<dyn PageRule>>,
}

impl DeckParser {
    /// Create a parser with the default rule set.
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Create a parser with a custom rule set.
    pub fn with_rules(rules: Vec<Box<dyn PageRule>>) -> Self {
        Self { rules }
    }

    /// Extract one quarter's metrics from a tokenized deck.
    ///
    /// Pages before the deck start are skipped. Every rule sees every
    /// remaining page in order; a metric keeps the first value written.
    pub fn parse(&self, pages: &[PageLayout], company: &CompanyProfile) -> QuarterlyMetrics {
        let start = find_deck_start(pages);
        if start > 0 {
            info!("Deck starts at page {} of {}", start + 1, pages.len());
        }

        let mut metrics = QuarterlyMetrics::new();
        for page in pages.iter().skip(start) {
            let ctx = PageContext::new(page, company.lending_only);
            for rule in &self.rules {
                rule.apply(&ctx, &mut metrics);
            }
        }

        derived::apply(&mut metrics, company.face_value);
        debug!("Extracted {} metrics", metrics.populated());
        metrics
    }
}

impl Default for DeckParser {
    fn default() -> Self {
        Self::new()
    }
}
