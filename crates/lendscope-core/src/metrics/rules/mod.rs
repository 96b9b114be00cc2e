//! Rule-based metric extractors for NBFC investor presentations.

pub mod aum;
pub mod balance_sheet;
pub mod columns;
pub mod disbursements;
pub mod income;
pub mod narrative;
pub mod npa;
pub mod numbers;
pub mod patterns;
pub mod ratios;

pub use aum::AumRule;
pub use balance_sheet::BalanceSheetRule;
pub use columns::{assign_to_columns, count_quarter_labels, locate_columns, ColumnPick};
pub use income::IncomeRule;
pub use npa::NpaRule;
pub use numbers::{decimals_in, first_number_in_range, is_numeric_word, parse_number, percentages_in};

use super::cascade::PageRule;

/// The full rule set, in page evaluation order.
pub fn default_rules() -> Vec<Box<dyn PageRule>> {
    vec![
        Box::new(AumRule::new()),
        Box::new(IncomeRule::new()),
        Box::new(ratios::nim()),
        Box::new(NpaRule::new()),
        Box::new(ratios::roa()),
        Box::new(ratios::roe()),
        Box::new(ratios::car()),
        Box::new(disbursements::disbursements()),
        Box::new(BalanceSheetRule::new()),
    ]
}
