// * Operations
// * Structured logging and run metrics

pub mod telemetry;

// * Re-exports for convenient access
pub use telemetry::{
    get_metrics_string, init_tracing, init_tracing_pretty, init_tracing_with_level,
    record_classification, record_iframe_fetch_duration, record_page_fetch_duration,
    record_rows_exported, record_scrape_outcome,
};
