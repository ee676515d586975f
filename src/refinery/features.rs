// * Content-Feature Records
// * Per-URL form/iframe presence as reported by the content scanner

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::constants::NOT_SCRAPED_STATUS;

/// Outcome of scanning one URL
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScrapeStatus {
    Success,
    NoFormsOrIframes,
    Timeout,
    ConnectionError,
    Http(u16),
    Error(String),
    #[default]
    NotScraped,
}

impl ScrapeStatus {
    /// Short metric label for this outcome
    pub fn class(&self) -> &'static str {
        match self {
            ScrapeStatus::Success => "success",
            ScrapeStatus::NoFormsOrIframes => "no_content",
            ScrapeStatus::Timeout => "timeout",
            ScrapeStatus::ConnectionError => "connection_error",
            ScrapeStatus::Http(_) => "http_error",
            ScrapeStatus::Error(_) => "error",
            ScrapeStatus::NotScraped => "not_scraped",
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, ScrapeStatus::Success | ScrapeStatus::NoFormsOrIframes)
    }
}

impl fmt::Display for ScrapeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeStatus::Success => write!(f, "Success"),
            ScrapeStatus::NoFormsOrIframes => write!(f, "No forms or iframes found"),
            ScrapeStatus::Timeout => write!(f, "Timeout"),
            ScrapeStatus::ConnectionError => write!(f, "Connection Error"),
            ScrapeStatus::Http(code) => write!(f, "HTTP {}", code),
            ScrapeStatus::Error(msg) => write!(f, "Error: {}", msg),
            ScrapeStatus::NotScraped => write!(f, "{}", NOT_SCRAPED_STATUS),
        }
    }
}

impl FromStr for ScrapeStatus {
    type Err = std::convert::Infallible;

    // * Inverse of Display; unrecognised text is kept as a generic error
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s {
            "Success" => ScrapeStatus::Success,
            "No forms or iframes found" => ScrapeStatus::NoFormsOrIframes,
            "Timeout" => ScrapeStatus::Timeout,
            "Connection Error" => ScrapeStatus::ConnectionError,
            "" | NOT_SCRAPED_STATUS => ScrapeStatus::NotScraped,
            other => {
                if let Some(code) = other.strip_prefix("HTTP ").and_then(|c| c.parse().ok()) {
                    ScrapeStatus::Http(code)
                } else {
                    let msg = other.strip_prefix("Error: ").unwrap_or(other);
                    ScrapeStatus::Error(msg.to_string())
                }
            }
        };
        Ok(status)
    }
}

impl Serialize for ScrapeStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScrapeStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(text.parse().unwrap_or_default())
    }
}

/// Form/iframe presence for one URL.
///
/// `has_iframes`, `iframe_count` and `iframe_with_forms_count` only count
/// iframes whose own document contains a form. `iframe_sources` and
/// `iframe_details` describe every iframe on the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentFeatures {
    pub has_forms: bool,
    pub form_count: usize,
    pub form_types: String,
    pub form_details: String,
    pub has_iframes: bool,
    pub iframe_count: usize,
    pub iframe_sources: String,
    pub iframe_details: String,
    pub iframe_forms_count: usize,
    pub iframe_with_forms_count: usize,
    pub iframe_forms_details: String,
    pub scrape_status: ScrapeStatus,
}

impl ContentFeatures {
    // * Defaults for a row the scanner never reached
    pub fn not_scraped() -> Self {
        Self::default()
    }

    // * Defaults for a row whose page could not be fetched
    pub fn failed(status: ScrapeStatus) -> Self {
        Self {
            scrape_status: status,
            ..Self::default()
        }
    }

    /// Form type labels as a list
    pub fn form_type_list(&self) -> Vec<&str> {
        split_list(&self.form_types)
    }

    /// Iframe source labels as a list
    pub fn iframe_source_list(&self) -> Vec<&str> {
        split_list(&self.iframe_sources)
    }
}

fn split_list(joined: &str) -> Vec<&str> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
