//! Common regex patterns for investor presentation extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Column headers
    pub static ref QUARTER_LABEL: Regex = Regex::new(r"Q[1-4]FY\d{2}").unwrap();

    pub static ref MONTH_WORD: Regex = Regex::new(r"^(Dec|Mar|Jun|Sep)$").unwrap();

    pub static ref MONTH_DATE: Regex = Regex::new(r"(Dec|Mar|Jun|Sep)-\d{2}$").unwrap();

    // Numeric tokens
    pub static ref NUMERIC_WORD: Regex = Regex::new(r"^-?[\d,()]+\.?\d*$").unwrap();

    pub static ref DECIMAL: Regex = Regex::new(r"\d+\.\d+").unwrap();

    pub static ref PLAIN_NUMBER: Regex = Regex::new(r"[\d,]+(?:\.\d+)?").unwrap();

    // Currency amounts: "₹ 4,066 crore", "₹1,64,720 Crores", "Rs.2,10,722 Cr"
    pub static ref NARRATIVE_AMOUNT: Regex = Regex::new(
        r"(?i)(?:₹|Rs\.?)\s*([\d,]+(?:\.\d+)?)\s*(?:lakh\s*(?:Cr|crore)s?|Cr|Crs|crore|Crores?)\b"
    ).unwrap();

    pub static ref LAKH_CRORE: Regex = Regex::new(
        r"(?i)(?:₹|Rs\.?)\s*([\d,.]+)\s*lakh\s*(?:Cr|crore)s?"
    ).unwrap();

    pub static ref CRORE_AMOUNT: Regex = Regex::new(
        r"(?i)([\d,]+(?:\.\d+)?)\s*(?:Cr|crore)s?\b"
    ).unwrap();

    pub static ref RS_CRORE: Regex = Regex::new(
        r"(?i)Rs\.?\s*([\d,]+(?:\.\d+)?)\s*(?:Cr|crore)"
    ).unwrap();

    // "₹55,017" as a single token
    pub static ref INLINE_RUPEE: Regex = Regex::new(r"^₹([\d,]+(?:\.\d+)?)$").unwrap();

    // AUM
    pub static ref AUM_LABEL: Regex = Regex::new(
        r"(?i)\bAUM\b|Assets\s+Under\s+Management|Loan\s+AUM|Business\s+AUM|Gross\s+Loan\s+Book|Loan\s+Book|Retail\s+Book|Book\s+Size"
    ).unwrap();

    pub static ref MILESTONE_CONTEXT: Regex = Regex::new(
        r"(?i)crossed|surpassed|milestone|first time|achieve"
    ).unwrap();

    // Profit and loss
    pub static ref PL_PAGE: Regex = Regex::new(
        r"(?i)net interest income|profit after tax|profit/\(loss\) after tax|\bnii\b|\bpat\b"
    ).unwrap();

    pub static ref NII_ROW: Regex = Regex::new(r"\bNII\b|(?i:Net\s+Interest\s+Income)").unwrap();

    pub static ref PAT_ROW: Regex = Regex::new(r"(?i)\bProfit\b.{0,25}\bTax\b").unwrap();

    pub static ref NII_KEYWORDS: Vec<Regex> = vec![
        Regex::new(r"(?i)Net\s+Interest\s+Income").unwrap(),
        Regex::new(r"(?i)\bNII\b").unwrap(),
    ];

    pub static ref PAT_KEYWORDS: Vec<Regex> = vec![
        Regex::new(r"(?i)standalone\s+profit\s+after\s+tax").unwrap(),
        Regex::new(r"(?i)profit\s+after\s+tax.*?Q3").unwrap(),
        Regex::new(r"(?i)profit\s+after\s+tax.*?quarter").unwrap(),
        Regex::new(r"(?i)profit\s+after\s+tax\s*\(PAT\)").unwrap(),
        Regex::new(r"(?i)consolidated\s+profit\s+after\s+tax.*?Q3").unwrap(),
    ];

    // Ratios
    pub static ref NIM_PAGE: Regex = Regex::new(r"NIM").unwrap();
    pub static ref NIM_ROW: Regex = Regex::new(r"\bNIMs?\b").unwrap();

    pub static ref ROA_PAGE: Regex = Regex::new(r"Ro?A\b").unwrap();
    pub static ref ROA_ROW: Regex = Regex::new(r"(?i)\bRo?A\b").unwrap();
    pub static ref ANNUALISED: Regex = Regex::new(r"(?i)annuali[sz]").unwrap();

    pub static ref ROE_PAGE: Regex = Regex::new(r"Ro?E\b").unwrap();
    pub static ref ROE_ROW: Regex = Regex::new(r"(?i)\bRo?E\b").unwrap();

    pub static ref CAR_PAGE: Regex = Regex::new(r"CRAR|Capital Adequacy").unwrap();
    pub static ref CAR_ROW: Regex = Regex::new(r"(?i)CRAR|Capital\s+Adequacy").unwrap();

    // Asset quality
    pub static ref GROSS_NPA_ROW: Regex = Regex::new(r"Gross\s+NPA\s*\(%\)|GNPA\s*\(%\)").unwrap();
    pub static ref NET_NPA_ROW: Regex = Regex::new(r"Net\s+NPA\s*\(%\)|NNPA\s*\(%\)").unwrap();

    // "GNPA & NNPA stood at 1.21% & 0.47%"
    pub static ref COMBINED_NPA: Regex = Regex::new(
        r"(?i)GNPA\s*[&and,]+\s*NNPA\D{0,20}(\d+\.\d+)\s*%\s*[&and,]+\s*(\d+\.\d+)\s*%"
    ).unwrap();

    pub static ref GNPA_NARRATIVE: Vec<Regex> = vec![
        Regex::new(r"(?i)GNPA\D{0,20}(\d+\.\d+)\s*%").unwrap(),
        Regex::new(r"(?i)Gross\s+NPA[^%\d]{0,30}(\d+\.\d+)\s*%").unwrap(),
    ];

    pub static ref NNPA_NARRATIVE: Vec<Regex> = vec![
        Regex::new(r"(?i)NNPA\D{0,20}(\d+\.\d+)\s*%").unwrap(),
        Regex::new(r"(?i)Net\s+NPA[^%\d]{0,30}(\d+\.\d+)\s*%").unwrap(),
    ];

    pub static ref STAGE3_QUALIFIER: Regex = Regex::new(r"Ratio|%|Asset").unwrap();

    // Disbursements
    pub static ref DISBURSEMENT_PAGE: Regex = Regex::new(r"Disbursement").unwrap();

    pub static ref DISBURSEMENT_KEYWORDS: Vec<Regex> = vec![
        Regex::new(r"(?i)Disbursement").unwrap(),
    ];

    // Balance sheet
    pub static ref SHARE_CAPITAL_ROW: Regex = Regex::new(r"(?i)\bShare\b.*\bCapital\b").unwrap();
    pub static ref RESERVE_ROW: Regex = Regex::new(r"(?i)\bReserve").unwrap();
    pub static ref SURPLUS_ROW: Regex = Regex::new(r"(?i)\bSurplus\b").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_label() {
        assert!(QUARTER_LABEL.is_match("Q3FY26"));
        assert!(!QUARTER_LABEL.is_match("Q3 FY26"));
        assert!(!QUARTER_LABEL.is_match("Q5FY26"));
    }

    #[test]
    fn test_nii_row_case_rules() {
        assert!(NII_ROW.is_match("NII 1,234"));
        assert!(!NII_ROW.is_match("nii 1,234"));
        assert!(NII_ROW.is_match("net interest income 1,234"));
    }

    #[test]
    fn test_pat_row_allows_loss_wording() {
        assert!(PAT_ROW.is_match("Profit/(Loss) after Tax 512"));
        assert!(!PAT_ROW.is_match("Profit for the period 512"));
    }

    #[test]
    fn test_combined_npa() {
        let caps = COMBINED_NPA
            .captures("GNPA & NNPA stood at 1.21% & 0.47% respectively")
            .unwrap();
        assert_eq!(&caps[1], "1.21");
        assert_eq!(&caps[2], "0.47");
    }

    #[test]
    fn test_ratio_page_gates_are_case_sensitive() {
        assert!(ROA_PAGE.is_match("RoA (%)"));
        assert!(!ROA_PAGE.is_match("roa"));
        assert!(CAR_PAGE.is_match("Capital Adequacy Ratio"));
    }
}
