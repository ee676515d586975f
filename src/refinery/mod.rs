// * The Refinery
// * Turns fetched HTML into content-feature records, then turns classified records
// * into the emitted table, pattern summary and report.

pub mod assembler;
pub mod features;
pub mod forms;
pub mod patterns;
pub mod report;

// * Re-exports for convenient access
pub use assembler::{assemble, OutputRow, OutputTable, TableSchema};
pub use features::{ContentFeatures, ScrapeStatus};
pub use forms::{build_features, detect_forms, scan_html, FormInfo, FormKind, IframeInfo, IframeSource, PageScan};
pub use patterns::{PatternSummary, PatternSummaryRow};
pub use report::{AnalysisReport, ReportContext};
