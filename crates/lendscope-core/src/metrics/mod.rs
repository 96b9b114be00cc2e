//! Metric extraction from tokenized investor presentations.

pub mod cascade;
pub mod derived;
pub mod parser;
pub mod rules;

pub use cascade::{Cascade, NarrativeTier, PageContext, PageRule, RowTier, TableTier, Tier};
pub use derived::DerivedMetrics;
pub use parser::DeckParser;
