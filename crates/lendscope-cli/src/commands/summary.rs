//! Cross-company summary tables printed after a run.

use std::fmt::Write;

use console::style;

use lendscope_core::{CompanyProfile, CompanyQuarterlyReport, MetricKey, QuarterlyMetrics, RosterOutcome};

const LABEL_WIDTH: usize = 26;
const CELL_WIDTH: usize = 12;
const MISSING: &str = "—";

/// Rows of the latest-quarter table.
const LATEST_ROWS: &[(MetricKey, &str)] = &[
    (MetricKey::AumCr, "AUM (₹Cr)"),
    (MetricKey::NiiCr, "NII (₹Cr)"),
    (MetricKey::NimPct, "NIM %"),
    (MetricKey::PatCr, "PAT (₹Cr)"),
    (MetricKey::GnpaPct, "GNPA %"),
    (MetricKey::NnpaPct, "NNPA %"),
    (MetricKey::RoaPct, "ROA %"),
    (MetricKey::RoePct, "ROE %"),
    (MetricKey::CarPct, "CAR %"),
    (MetricKey::DisbursementsCr, "Disbursements (₹Cr)"),
    (MetricKey::BookValuePerShare, "BV/Share (₹)"),
];

/// Column headings for the default roster.
const SHORT_NAMES: &[(&str, &str)] = &[
    ("poonawalla", "Poonawalla"),
    ("bajaj", "Bajaj Fin"),
    ("shriram", "Shriram"),
    ("ltf", "L&T Fin"),
    ("chola", "Chola"),
    ("abcapital", "AB Capital"),
    ("piramal", "Piramal"),
    ("muthoot", "Muthoot"),
    ("mahindra", "Mahindra"),
];

fn short_name(company: &CompanyProfile) -> String {
    SHORT_NAMES
        .iter()
        .find(|(key, _)| *key == company.key)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| company.key.chars().take(CELL_WIDTH - 1).collect())
}

/// Format a crore amount with thousands separators and no decimals.
pub fn format_crore(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn format_cell(key: MetricKey, value: Option<f64>) -> String {
    let text = match (key, value) {
        (_, None) => MISSING.to_string(),
        (MetricKey::AumCr | MetricKey::NiiCr | MetricKey::PatCr | MetricKey::DisbursementsCr, Some(v)) => {
            format_crore(v)
        }
        (MetricKey::BookValuePerShare, Some(v)) => format!("{v:.2}"),
        (_, Some(v)) => format!("{v:.2}%"),
    };
    format!("{text:>CELL_WIDTH$}")
}

/// A company and its report, `None` when the company failed.
type Column<'a> = (&'a CompanyProfile, Option<&'a CompanyQuarterlyReport>);

fn header(first: &str, columns: &[Column<'_>]) -> String {
    let mut line = format!("{first:<LABEL_WIDTH$}");
    for (company, _) in columns {
        let _ = write!(line, "{:>CELL_WIDTH$}", short_name(company));
    }
    line
}

fn quarter(report: Option<&CompanyQuarterlyReport>, index: usize) -> Option<&QuarterlyMetrics> {
    report.and_then(|r| r.quarters.get(index))
}

/// Render the latest-quarter table and the trend tables.
pub fn render(companies: &[&CompanyProfile], outcome: &RosterOutcome, quarters: usize) -> String {
    let columns: Vec<Column<'_>> = companies
        .iter()
        .map(|c| (*c, outcome.report(&c.key)))
        .collect();
    let width = LABEL_WIDTH + CELL_WIDTH * columns.len();
    let rule = "=".repeat(width);
    let thin = "-".repeat(width);

    let mut out = String::new();
    let _ = writeln!(out, "{rule}\nLATEST QUARTER METRICS\n{rule}");
    let _ = writeln!(out, "{}\n{thin}", header("Metric", &columns));
    for (key, label) in LATEST_ROWS {
        let mut line = format!("{label:<LABEL_WIDTH$}");
        for (_, report) in &columns {
            line.push_str(&format_cell(*key, quarter(*report, 0).and_then(|q| q.get(*key))));
        }
        let _ = writeln!(out, "{line}");
    }

    for (key, title) in [
        (MetricKey::AumCr, "AUM TREND (₹ Cr), newest to oldest"),
        (MetricKey::PatCr, "PAT TREND (₹ Cr), newest to oldest"),
    ] {
        let _ = writeln!(out, "\n{rule}\n{quarters}-QUARTER {title}\n{rule}");
        let _ = writeln!(out, "{}\n{thin}", header("Quarter", &columns));
        for index in 0..quarters {
            let mut line = format!("{:<LABEL_WIDTH$}", format!("Q{}", index + 1));
            for (_, report) in &columns {
                line.push_str(&format_cell(key, quarter(*report, index).and_then(|q| q.get(key))));
            }
            let _ = writeln!(out, "{line}");
        }
    }

    out
}

/// Print the summary tables followed by any failures.
pub fn print(companies: &[&CompanyProfile], outcome: &RosterOutcome, quarters: usize) {
    println!();
    print!("{}", render(companies, outcome, quarters));

    if outcome.is_success() {
        println!(
            "\n{} {} companies processed",
            style("✓").green(),
            outcome.reports.len()
        );
    } else {
        println!();
        for (key, message) in &outcome.failures {
            println!("{} {}: {}", style("✗").red(), key, message);
        }
    }
}
