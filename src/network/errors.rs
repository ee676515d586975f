use thiserror::Error;

use crate::refinery::features::ScrapeStatus;

// * Unified Error type for the Network Layer.
// * Never leaves the scanner: every error is folded into a ScrapeStatus.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl NetworkError {
    /// Maps the failure onto the status value recorded for the URL
    pub fn to_status(&self) -> ScrapeStatus {
        match self {
            NetworkError::Reqwest(e) if e.is_timeout() => ScrapeStatus::Timeout,
            NetworkError::Reqwest(e) if e.is_connect() => ScrapeStatus::ConnectionError,
            NetworkError::Reqwest(e) => match e.status() {
                Some(code) => ScrapeStatus::Http(code.as_u16()),
                None => ScrapeStatus::Error(e.to_string()),
            },
            NetworkError::HttpStatus(code) => ScrapeStatus::Http(*code),
            NetworkError::InvalidUrl(url) => ScrapeStatus::Error(format!("invalid URL {}", url)),
        }
    }
}
