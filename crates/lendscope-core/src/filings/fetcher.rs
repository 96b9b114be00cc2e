//! Attachment download with archive fallback.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::debug;

use super::DocumentSource;
use crate::error::{DiscoveryError, Result};
use crate::models::StorageConfig;

/// Downloads filing PDFs, trying the live store before the archive.
pub struct AttachmentFetcher {
    client: reqwest::Client,
    bases: Vec<String>,
}

impl AttachmentFetcher {
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| DiscoveryError::Client(e.to_string()))?;

        Ok(Self {
            client,
            bases: vec![config.live_base.clone(), config.archive_base.clone()],
        })
    }

    /// Body of `url` if it is served as a PDF with status 200.
    async fn try_location(&self, url: &str) -> Option<Vec<u8>> {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!("{}: request failed: {}", url, e);
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            debug!("{}: status {}", url, response.status());
            return None;
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !content_type.contains("pdf") {
            debug!("{}: not a PDF ({})", url, content_type);
            return None;
        }

        match response.bytes().await {
            Ok(body) => Some(body.to_vec()),
            Err(e) => {
                debug!("{}: body read failed: {}", url, e);
                None
            }
        }
    }
}

#[async_trait]
impl DocumentSource for AttachmentFetcher {
    async fn fetch(&self, attachment: &str) -> Option<Vec<u8>> {
        for base in &self.bases {
            let url = format!("{base}{attachment}");
            if let Some(body) = self.try_location(&url).await {
                return Some(body);
            }
        }
        None
    }
}
