// * Content Scanner
// * Bounded concurrent fetch of every URL, producing exactly one feature record per URL.
// * Failures become status values; nothing here returns an error to the caller.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::network::client::PageClient;
use crate::network::errors::NetworkError;
use crate::ops::telemetry;
use crate::refinery::features::ContentFeatures;
use crate::refinery::forms::{build_features, detect_forms, scan_html, FormInfo, IframeInfo};

pub struct ContentScanner {
    client: PageClient,
    concurrency: usize,
    show_progress: bool,
}

impl ContentScanner {
    pub fn new(concurrency: usize, timeout: Duration) -> Result<Self, NetworkError> {
        Ok(Self {
            client: PageClient::new(timeout)?,
            concurrency: concurrency.max(1),
            show_progress: true,
        })
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Scans every distinct URL with at most `concurrency` requests in flight.
    ///
    /// The map holds one entry per distinct input URL.
    pub async fn scan<I, S>(&self, urls: I) -> HashMap<String, ContentFeatures>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let unique: Vec<String> = urls
            .into_iter()
            .map(Into::<String>::into)
            .filter(|u: &String| seen.insert(u.clone()))
            .collect();

        let total = unique.len();
        info!(urls = total, concurrency = self.concurrency, "Content scan started");

        let pb = self.progress_bar(total);
        let started = Instant::now();

        let results: Vec<(String, ContentFeatures)> = stream::iter(unique)
            .map(|url| {
                let pb = pb.clone();
                async move {
                    let features = self.scan_page(&url).await;
                    pb.inc(1);
                    (url, features)
                }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        pb.finish_and_clear();

        let fetched = results.iter().filter(|(_, f)| f.scrape_status.is_fetched()).count();
        info!(
            urls = total,
            fetched = fetched,
            failed = total - fetched,
            elapsed_secs = started.elapsed().as_secs_f64(),
            "Content scan complete"
        );

        results.into_iter().collect()
    }

    /// Fetches one page and inspects its forms and iframes
    pub async fn scan_page(&self, url: &str) -> ContentFeatures {
        let started = Instant::now();
        let result = self.client.fetch(url).await;
        telemetry::record_page_fetch_duration(started.elapsed().as_secs_f64());

        let features = match result {
            Ok(html) => {
                let scan = scan_html(&html, url);
                let mut iframe_forms = Vec::with_capacity(scan.iframes.len());
                for frame in &scan.iframes {
                    iframe_forms.push(self.forms_in_iframe(frame).await);
                }
                build_features(&scan, &iframe_forms)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Page fetch failed");
                ContentFeatures::failed(e.to_status())
            }
        };

        telemetry::record_scrape_outcome(&features.scrape_status);
        debug!(
            url = %url,
            status = %features.scrape_status,
            forms = features.form_count,
            iframes_with_forms = features.iframe_with_forms_count,
            "Page scanned"
        );
        features
    }

    // * Forms inside an iframe document; fetch failures count as "no forms"
    async fn forms_in_iframe(&self, frame: &IframeInfo) -> Vec<FormInfo> {
        if let Some(doc) = &frame.srcdoc {
            return detect_forms(doc);
        }
        if !frame.is_fetchable() {
            return Vec::new();
        }
        let Some(src) = frame.src.as_deref() else {
            return Vec::new();
        };

        let started = Instant::now();
        let result = self.client.fetch(src).await;
        telemetry::record_iframe_fetch_duration(started.elapsed().as_secs_f64());

        match result {
            Ok(html) => detect_forms(&html),
            Err(e) => {
                debug!(src = %src, error = %e, "Iframe fetch failed");
                Vec::new()
            }
        }
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
            .map(|s| s.progress_chars("=> "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}
