// * Telemetry - JSON Logging and Prometheus Metrics
// * A run is a batch job: metrics are rendered to text at the end, no server.

use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_counter_vec, register_gauge, register_histogram_vec, Counter,
    CounterVec, Encoder, Gauge, HistogramVec, TextEncoder,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::refinery::features::ScrapeStatus;

lazy_static! {
    // * Rows classified by the engine
    pub static ref URLS_CLASSIFIED_TOTAL: Counter = register_counter!(
        "site_scope_urls_classified_total",
        "Total number of URLs classified"
    ).unwrap();

    // * Groups handed out in the latest run
    pub static ref GROUPS_ASSIGNED: Gauge = register_gauge!(
        "site_scope_groups_assigned",
        "Number of pattern groups in the latest run"
    ).unwrap();

    // * Templates handed out in the latest run
    pub static ref TEMPLATES_ASSIGNED: Gauge = register_gauge!(
        "site_scope_templates_assigned",
        "Number of templates in the latest run"
    ).unwrap();

    // * Scrape outcomes by status class
    pub static ref SCRAPE_OUTCOMES_TOTAL: CounterVec = register_counter_vec!(
        "site_scope_scrape_outcomes_total",
        "Total scrape outcomes by status class",
        &["status"]
    ).unwrap();

    // * Fetch duration histogram, page vs iframe document
    pub static ref SCRAPE_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "site_scope_scrape_duration_seconds",
        "Fetch duration in seconds",
        &["kind"],
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    ).unwrap();

    // * Rows written to the output table
    pub static ref ROWS_EXPORTED_TOTAL: Counter = register_counter!(
        "site_scope_rows_exported_total",
        "Total rows written to output tables"
    ).unwrap();
}

/// Initializes the tracing subscriber with JSON formatting on stderr
///
/// # Example
/// ```ignore
/// use site_scope::ops::telemetry;
///
/// telemetry::init_tracing();
/// tracing::info!(urls = 120, "Inventory loaded");
/// ```
pub fn init_tracing() {
    init_tracing_with_level("info");
}

/// Initializes JSON tracing with a custom default level (RUST_LOG still wins)
pub fn init_tracing_with_level(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .init();
}

/// Initializes tracing with human-readable output
pub fn init_tracing_pretty() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().pretty().with_writer(std::io::stderr))
        .init();
}

/// Returns the current metrics in the Prometheus text format
pub fn get_metrics_string() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Records the outcome of a classification run
pub fn record_classification(urls: usize, groups: usize, templates: usize) {
    URLS_CLASSIFIED_TOTAL.inc_by(urls as f64);
    GROUPS_ASSIGNED.set(groups as f64);
    TEMPLATES_ASSIGNED.set(templates as f64);
}

/// Records one scrape outcome
pub fn record_scrape_outcome(status: &ScrapeStatus) {
    SCRAPE_OUTCOMES_TOTAL
        .with_label_values(&[status.class()])
        .inc();
}

/// Records how long a top-level page fetch took
pub fn record_page_fetch_duration(seconds: f64) {
    SCRAPE_DURATION_SECONDS
        .with_label_values(&["page"])
        .observe(seconds);
}

/// Records how long an iframe document fetch took
pub fn record_iframe_fetch_duration(seconds: f64) {
    SCRAPE_DURATION_SECONDS
        .with_label_values(&["iframe"])
        .observe(seconds);
}

pub fn record_rows_exported(rows: usize) {
    ROWS_EXPORTED_TOTAL.inc_by(rows as f64);
}
