// * Configuration Constants
// * Central location for all classification thresholds, sentinels and scrape defaults

// * Minimum number of URLs sharing a pattern before the pattern becomes a group
pub const GROUP_THRESHOLD: usize = 5;

// * Label prefixes for sequential group/template numbering
pub const GROUP_LABEL_PREFIX: &str = "Group ";
pub const TEMPLATE_LABEL_PREFIX: &str = "Template ";

// * Locale returned when no 2-letter code is found in the path
pub const DEFAULT_LOCALE: &str = "en";

// * Block name that never contributes to a template fingerprint
pub const UNKNOWN_BLOCK_NAME: &str = "unknown";

// * Separator used when joining block names into template details
pub const TEMPLATE_DETAILS_SEPARATOR: &str = ", ";

// * Sort rank for ungrouped rows (sorts after every real group)
pub const UNGROUPED_RANK: u64 = u64::MAX;

// * Default output folder and file prefix
pub const DEFAULT_OUTPUT_DIR: &str = "basic_scoping";
pub const OUTPUT_FILE_PREFIX: &str = "amsbasic";

// * Fallback domain when neither the origin nor any URL yields a host
pub const FALLBACK_DOMAIN: &str = "site";

// * Content scraper defaults
pub const DEFAULT_SCRAPE_CONCURRENCY: usize = 5;
pub const DEFAULT_SCRAPE_TIMEOUT_SECS: u64 = 10;
pub const SCRAPER_USER_AGENT: &str = "Mozilla/5.0 (compatible; site-scope/0.1)";

// * Status recorded for rows the scraper never visited
pub const NOT_SCRAPED_STATUS: &str = "Not scraped";

// * Minimum combined population for a cross-group template to be reported
pub const CROSS_GROUP_TEMPLATE_MIN: usize = 5;
