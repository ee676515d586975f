// * The Classification Engine
// * Pure, synchronous transformation of a URL inventory (plus optional block inventory)
// * into ordered, labelled records. No I/O happens here.

pub mod fingerprint;
pub mod grouping;
pub mod locale;
pub mod normalization;
pub mod ordering;
pub mod pipeline;

// * Re-exports for convenient access
pub use fingerprint::{assign_templates, BlockIndex, TemplateAssignment, TemplateFingerprinter};
pub use grouping::{url_pattern, PatternGroups, PatternKey};
pub use locale::extract_locale;
pub use normalization::{is_locale_code, path_segments, site_domain, NormalizedPath};
pub use ordering::{compare_rows, group_rank, order_rows, Ordered};
pub use pipeline::{classify, Classification, Classifier, UrlRecord};
