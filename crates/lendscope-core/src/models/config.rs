//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::company::{default_roster, CompanyProfile};
use crate::error::{LendscopeError, Result};

/// Main configuration for the lendscope pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Companies processed by a full run.
    pub roster: Vec<CompanyProfile>,

    /// Directory holding downloaded presentations, one subdirectory per company.
    pub cache_dir: PathBuf,

    /// Directory receiving one `<key>.json` report per company.
    pub output_dir: PathBuf,

    /// Number of most recent unique-month filings to process.
    pub quarters_to_fetch: usize,

    /// First calendar year included in the filing search.
    pub from_year: i32,

    /// Vertical tolerance (layout units) for grouping words into rows.
    pub y_tolerance: f64,

    /// Filing discovery configuration.
    pub discovery: DiscoveryConfig,

    /// Document storage configuration.
    pub storage: StorageConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            roster: default_roster(),
            cache_dir: PathBuf::from("data").join("pdfs"),
            output_dir: PathBuf::from("data"),
            quarters_to_fetch: 5,
            from_year: 2023,
            y_tolerance: 8.0,
            discovery: DiscoveryConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

/// Filing repository search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Announcement landing page, requested once per company to obtain session cookies.
    pub landing_url: String,

    /// Paginated announcement search endpoint.
    pub search_url: String,

    /// Highest page number requested.
    pub max_pages: u32,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// User agent presented to the exchange.
    pub user_agent: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            landing_url: "https://www.bseindia.com/corporates/ann.html".to_string(),
            search_url: "https://api.bseindia.com/BseIndiaAPI/api/AnnSubCategoryGetData/w"
                .to_string(),
            max_pages: 19,
            timeout_secs: 20,
            user_agent: default_user_agent(),
        }
    }
}

impl DiscoveryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Document storage locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base URL for recently published attachments.
    pub live_base: String,

    /// Base URL for archived attachments.
    pub archive_base: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// User agent presented to the document store.
    pub user_agent: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            live_base: "https://www.bseindia.com/xml-data/corpfiling/AttachLive/".to_string(),
            archive_base: "https://www.bseindia.com/xml-data/corpfiling/AttachHis/".to_string(),
            timeout_secs: 60,
            user_agent: default_user_agent(),
        }
    }
}

impl StorageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

impl PipelineConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.quarters_to_fetch == 0 {
            return Err(LendscopeError::Config(
                "quarters_to_fetch must be at least 1".to_string(),
            ));
        }
        if self.y_tolerance <= 0.0 {
            return Err(LendscopeError::Config(
                "y_tolerance must be positive".to_string(),
            ));
        }
        if let Some(c) = self.roster.iter().find(|c| c.face_value == 0.0) {
            return Err(LendscopeError::Config(format!(
                "company '{}' has a zero face value",
                c.key
            )));
        }
        Ok(())
    }

    /// Look up a company by roster key.
    pub fn company(&self, key: &str) -> Result<&CompanyProfile> {
        self.roster
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| LendscopeError::UnknownCompany {
                key: key.to_string(),
                known: self.roster_keys().join(", "),
            })
    }

    /// All roster keys, in roster order.
    pub fn roster_keys(&self) -> Vec<&str> {
        self.roster.iter().map(|c| c.key.as_str()).collect()
    }

    /// Cache directory for one company.
    pub fn company_cache_dir(&self, key: &str) -> PathBuf {
        self.cache_dir.join(key)
    }

    /// Report path for one company.
    pub fn report_path(&self, key: &str) -> PathBuf {
        self.output_dir.join(format!("{key}.json"))
    }
}
