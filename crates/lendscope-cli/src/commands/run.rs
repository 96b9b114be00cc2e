//! Run command - collect metrics for the roster or a single company.

use std::path::{Path, PathBuf};

use console::style;
use tracing::debug;

use lendscope_core::{CompanyProfile, Pipeline, PipelineConfig};

use super::summary;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lendscope")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    if let Some(path) = config_path {
        return Ok(PipelineConfig::from_file(path)?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config {}", default_path.display());
        Ok(PipelineConfig::from_file(&default_path)?)
    } else {
        Ok(PipelineConfig::default())
    }
}

pub async fn run(company: Option<&str>, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    // Reject unknown keys before any network activity
    let companies: Vec<CompanyProfile> = match company {
        Some(key) => vec![config.company(key)?.clone()],
        None => config.roster.clone(),
    };
    let quarters = config.quarters_to_fetch;

    println!(
        "{} Collecting {} quarters for {} companies",
        style("ℹ").blue(),
        quarters,
        companies.len()
    );

    let pipeline = Pipeline::new(config)?;
    let outcome = pipeline.run_roster(company).await?;

    let columns: Vec<&CompanyProfile> = companies.iter().collect();
    summary::print(&columns, &outcome, quarters);

    Ok(())
}
