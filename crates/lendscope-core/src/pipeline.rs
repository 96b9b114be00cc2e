//! Per-company pipeline: discover, select, download, parse, persist.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::error::Result;
use crate::filings::{latest_per_month, AttachmentFetcher, BseClient, DocumentSource, FilingSource};
use crate::metrics::DeckParser;
use crate::models::{
    CompanyProfile, CompanyQuarterlyReport, FilingRecord, MetricKey, PipelineConfig, QuarterlyMetrics,
};
use crate::pdf::{DeckReader, PdfExtractor};

/// Result of processing several companies.
#[derive(Debug, Default)]
pub struct RosterOutcome {
    /// Reports by company key, in roster order.
    pub reports: Vec<(String, CompanyQuarterlyReport)>,
    /// Companies that failed, with the error message.
    pub failures: Vec<(String, String)>,
}

impl RosterOutcome {
    pub fn report(&self, key: &str) -> Option<&CompanyQuarterlyReport> {
        self.reports.iter().find(|(k, _)| k == key).map(|(_, r)| r)
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Extraction pipeline over the configured roster.
pub struct Pipeline {
    config: PipelineConfig,
    filings: Box<dyn FilingSource>,
    documents: Box<dyn DocumentSource>,
    reader: Box<dyn DeckReader>,
    parser: DeckParser,
}

impl Pipeline {
    /// Create a pipeline talking to the exchange.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let filings = BseClient::new(config.discovery.clone());
        let documents = AttachmentFetcher::new(&config.storage)?;
        let reader = PdfExtractor::new().with_y_tolerance(config.y_tolerance);
        Ok(Self::with_sources(config, filings, documents, reader))
    }

    /// Create a pipeline with custom sources and reader.
    pub fn with_sources(
        config: PipelineConfig,
        filings: impl FilingSource + 'static,
        documents: impl DocumentSource + 'static,
        reader: impl DeckReader + 'static,
    ) -> Self {
        Self {
            config,
            filings: Box::new(filings),
            documents: Box::new(documents),
            reader: Box::new(reader),
            parser: DeckParser::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process the whole roster, or only the company named by `key`.
    ///
    /// An unknown key is an error. Failures of individual companies are
    /// logged and collected; the remaining companies still run.
    pub async fn run_roster(&self, key: Option<&str>) -> Result<RosterOutcome> {
        let companies: Vec<&CompanyProfile> = match key {
            Some(k) => vec![self.config.company(k)?],
            None => self.config.roster.iter().collect(),
        };

        let mut outcome = RosterOutcome::default();
        for company in companies {
            match self.run_company(company).await {
                Ok(report) => outcome.reports.push((company.key.clone(), report)),
                Err(e) => {
                    error!("Error processing {}: {}", company.key, e);
                    outcome.failures.push((company.key.clone(), e.to_string()));
                }
            }
        }
        Ok(outcome)
    }

    /// Run every stage for one company and write its report.
    pub async fn run_company(&self, company: &CompanyProfile) -> Result<CompanyQuarterlyReport> {
        info!("{} (BSE {})", company.name, company.bse_code);

        let filings = self
            .filings
            .list_filings(&company.bse_code, self.config.from_year)
            .await?;
        let selected: Vec<FilingRecord> = latest_per_month(filings)
            .into_iter()
            .take(self.config.quarters_to_fetch)
            .collect();
        for filing in &selected {
            info!("  {}  {}", filing.filing_date, short(&filing.attachment, 40));
        }

        let cache_dir = self.config.company_cache_dir(&company.key);
        fs::create_dir_all(&cache_dir)?;

        let mut downloads = Vec::with_capacity(selected.len());
        for filing in &selected {
            let path = cache_dir.join(format!("{}.pdf", filing.cache_stem()));
            self.download(filing, &path).await?;
            downloads.push((filing, path));
        }

        let mut quarters = Vec::new();
        for (filing, path) in downloads {
            if !path.exists() {
                info!("  SKIP {}", path.display());
                continue;
            }
            match self.parse_file(&path, company) {
                Ok(metrics) => {
                    info!("  {}  {}", file_name(&path), headline(&metrics));
                    quarters.push(metrics.with_filing_date(filing.filing_date));
                }
                Err(e) => warn!("  {}  unreadable, skipped: {}", file_name(&path), e),
            }
        }

        let report = CompanyQuarterlyReport::new(company, quarters);
        let out = self.persist(&company.key, &report)?;
        info!("Saved {} ({} quarters)", out.display(), report.quarters.len());
        Ok(report)
    }

    /// Ensure the filing is cached at `path`. A failed fetch leaves no file.
    async fn download(&self, filing: &FilingRecord, path: &Path) -> Result<()> {
        let name = file_name(path);
        if path.exists() {
            let size = fs::metadata(path)?.len();
            info!("  {}  cached ({} B)", name, size);
            return Ok(());
        }

        match self.documents.fetch(&filing.attachment).await {
            Some(bytes) => {
                fs::write(path, &bytes)?;
                info!("  {}  OK  ({} B)", name, bytes.len());
            }
            None => info!("  {}  FAILED  (0 B)", name),
        }
        Ok(())
    }

    fn parse_file(&self, path: &Path, company: &CompanyProfile) -> Result<QuarterlyMetrics> {
        let data = fs::read(path)?;
        let pages = self.reader.read_pages(&data)?;
        Ok(self.parser.parse(&pages, company))
    }

    fn persist(&self, key: &str, report: &CompanyQuarterlyReport) -> Result<PathBuf> {
        fs::create_dir_all(&self.config.output_dir)?;
        let path = self.config.report_path(key);
        fs::write(&path, serde_json::to_string_pretty(report)?)?;
        Ok(path)
    }
}

/// `AUM=… NII=… PAT=… BV=…` with `?` for missing values.
pub fn headline(metrics: &QuarterlyMetrics) -> String {
    let show = |key| {
        metrics
            .get(key)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "?".to_string())
    };
    format!(
        "AUM={}  NII={}  PAT={}  BV={}",
        show(MetricKey::AumCr),
        show(MetricKey::NiiCr),
        show(MetricKey::PatCr),
        show(MetricKey::BookValuePerShare),
    )
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn short(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
