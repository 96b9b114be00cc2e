//! BSE announcement search client.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ORIGIN, REFERER};
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::FilingSource;
use crate::error::{DiscoveryError, Result};
use crate::models::{DiscoveryConfig, FilingRecord};

const PRESENTATION_SUBJECT: &str = "Investor Presentation";
const EXCLUDED_SUBJECTS: &[&str] = &["Intimation", "Meet"];

/// One page of the announcement search response.
#[derive(Debug, Default, Deserialize)]
struct SearchPage {
    #[serde(rename = "Table", default)]
    table: Option<Vec<Announcement>>,
}

#[derive(Debug, Deserialize)]
struct Announcement {
    #[serde(rename = "NEWSSUB", default)]
    subject: Option<String>,
    #[serde(rename = "NEWS_DT", default)]
    news_date: Option<String>,
    #[serde(rename = "ATTACHMENTNAME", default)]
    attachment: Option<String>,
}

/// Whether an announcement subject is an investor presentation upload.
pub fn is_investor_presentation(subject: &str) -> bool {
    subject.contains(PRESENTATION_SUBJECT) && !EXCLUDED_SUBJECTS.iter().any(|s| subject.contains(s))
}

impl Announcement {
    fn into_record(self) -> Option<FilingRecord> {
        let subject = self.subject.unwrap_or_default();
        if !is_investor_presentation(&subject) {
            return None;
        }
        let raw_date = self.news_date.unwrap_or_default();
        let day: String = raw_date.chars().take(10).collect();
        match NaiveDate::parse_from_str(&day, "%Y-%m-%d") {
            Ok(date) => Some(FilingRecord::new(date, self.attachment.unwrap_or_default(), subject)),
            Err(_) => {
                warn!("Skipping filing with unparsable date '{}'", raw_date);
                None
            }
        }
    }
}

/// Client for the BSE corporate announcement API.
pub struct BseClient {
    config: DiscoveryConfig,
}

impl BseClient {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    /// A fresh cookie-carrying session with browser-like headers.
    fn session(&self) -> Result<reqwest::Client> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        if let Ok(referer) = HeaderValue::from_str(&self.config.landing_url) {
            headers.insert(REFERER, referer);
        }
        if let Some(origin) = Url::parse(&self.config.landing_url)
            .ok()
            .map(|u| u.origin().ascii_serialization())
            .and_then(|o| HeaderValue::from_str(&o).ok())
        {
            headers.insert(ORIGIN, origin);
        }

        reqwest::Client::builder()
            .user_agent(self.config.user_agent.as_str())
            .default_headers(headers)
            .cookie_store(true)
            .timeout(self.config.timeout())
            .build()
            .map_err(|e| DiscoveryError::Client(e.to_string()).into())
    }

    /// Visit the landing page so the search endpoint accepts the session.
    async fn warm_up(&self, client: &reqwest::Client, bse_code: &str) -> Result<()> {
        let url = format!("{}?scrip={}", self.config.landing_url, bse_code);
        let response = client.get(&url).send().await.map_err(|e| DiscoveryError::Session {
            code: bse_code.to_string(),
            reason: e.to_string(),
        })?;
        debug!("Landing page returned {}", response.status());
        Ok(())
    }

    /// Announcements on one search page. `None` ends pagination.
    async fn search_page(
        &self,
        client: &reqwest::Client,
        bse_code: &str,
        from_year: i32,
        page: u32,
    ) -> Option<Vec<Announcement>> {
        let params = [
            ("strScrip", bse_code.to_string()),
            ("strCat", "-1".to_string()),
            ("strPrevDate", format!("{from_year}0101")),
            ("strToDate", Local::now().format("%Y%m%d").to_string()),
            ("strType", "C".to_string()),
            ("strSearch", "P".to_string()),
            ("pageno", page.to_string()),
        ];

        let response = match client.get(&self.config.search_url).query(&params).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Search page {} for {} failed: {}", page, bse_code, e);
                return None;
            }
        };
        let body: SearchPage = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                warn!("Search page {} for {} is not valid JSON: {}", page, bse_code, e);
                return None;
            }
        };

        body.table.filter(|t| !t.is_empty())
    }
}

#[async_trait]
impl FilingSource for BseClient {
    async fn list_filings(&self, bse_code: &str, from_year: i32) -> Result<Vec<FilingRecord>> {
        let client = self.session()?;
        self.warm_up(&client, bse_code).await?;

        let mut records = Vec::new();
        for page in 1..=self.config.max_pages {
            let Some(rows) = self.search_page(&client, bse_code, from_year, page).await else {
                break;
            };
            debug!("Search page {}: {} announcements", page, rows.len());
            records.extend(rows.into_iter().filter_map(Announcement::into_record));
        }

        records.sort_by(|a, b| b.filing_date.cmp(&a.filing_date));
        info!("{} presentations found", records.len());
        Ok(records)
    }
}
