// * Run Configuration
// * Everything a run needs is passed in explicitly; nothing is read from the working directory.

pub mod constants;

use std::path::PathBuf;
use thiserror::Error;

use constants::{
    DEFAULT_OUTPUT_DIR, DEFAULT_SCRAPE_CONCURRENCY, DEFAULT_SCRAPE_TIMEOUT_SECS, GROUP_THRESHOLD,
};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("group threshold must be at least 1")]
    ZeroGroupThreshold,

    #[error("scrape concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("scrape timeout must be at least 1 second")]
    ZeroTimeout,
}

/// Configuration for a single classification run
#[derive(Debug, Clone)]
pub struct ScopeConfig {
    /// URL inventory JSON
    pub urls_path: PathBuf,
    /// Block inventory JSON; `None` disables template fingerprinting
    pub blocks_path: Option<PathBuf>,
    /// Output folder, created if missing
    pub output_dir: PathBuf,
    /// Overrides the customer name found in the URL inventory
    pub customer: Option<String>,
    /// Minimum pattern population for a group
    pub group_threshold: usize,
    /// Whether to run the content scraper
    pub scrape: bool,
    pub scrape_concurrency: usize,
    pub scrape_timeout_secs: u64,
    /// Whether to write the analysis report
    pub report: bool,
    /// Whether to write the pattern summary table
    pub pattern_summary: bool,
    /// Whether to copy the input files into the output folder
    pub copy_sources: bool,
    /// Where to write the Prometheus text exposition, if anywhere
    pub metrics_path: Option<PathBuf>,
}

impl ScopeConfig {
    /// Creates a configuration with defaults for everything but the URL inventory
    pub fn new(urls_path: impl Into<PathBuf>) -> Self {
        Self {
            urls_path: urls_path.into(),
            blocks_path: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            customer: None,
            group_threshold: GROUP_THRESHOLD,
            scrape: false,
            scrape_concurrency: DEFAULT_SCRAPE_CONCURRENCY,
            scrape_timeout_secs: DEFAULT_SCRAPE_TIMEOUT_SECS,
            report: false,
            pattern_summary: false,
            copy_sources: true,
            metrics_path: None,
        }
    }

    pub fn with_blocks(mut self, path: impl Into<PathBuf>) -> Self {
        self.blocks_path = Some(path.into());
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_report(mut self, enabled: bool) -> Self {
        self.report = enabled;
        self
    }

    pub fn with_pattern_summary(mut self, enabled: bool) -> Self {
        self.pattern_summary = enabled;
        self
    }

    pub fn with_copy_sources(mut self, enabled: bool) -> Self {
        self.copy_sources = enabled;
        self
    }

    // * Rejects settings that would make a run meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.group_threshold == 0 {
            return Err(ConfigError::ZeroGroupThreshold);
        }
        if self.scrape && self.scrape_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.scrape && self.scrape_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
