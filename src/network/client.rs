use crate::config::constants::SCRAPER_USER_AGENT;
use crate::network::errors::NetworkError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

// * HTTP client for the content scanner.
// * One shared instance per run; per-request timeout, no retries.
#[derive(Clone)]
pub struct PageClient {
    inner: Client,
}

impl PageClient {
    // * Builds the client with a fixed user agent and the configured timeout.
    pub fn new(timeout: Duration) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .user_agent(SCRAPER_USER_AGENT)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self { inner: client })
    }

    // * Fetches a page body. Non-2xx responses are errors carrying the status code.
    pub async fn fetch(&self, url: &str) -> Result<String, NetworkError> {
        let parsed = Url::parse(url).map_err(|_| NetworkError::InvalidUrl(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(NetworkError::InvalidUrl(url.to_string()));
        }

        let resp = self.inner.get(parsed).send().await?;
        let status = resp.status();

        if !status.is_success() {
            return Err(NetworkError::HttpStatus(status.as_u16()));
        }

        Ok(resp.text().await?)
    }
}
