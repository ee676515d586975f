// * Site-Scope
// * Classifies a crawled site's URL inventory into pattern groups, locales and templates,
// * optionally enriched with form/iframe presence, and exports the result as a table.

pub mod config;
pub mod engine;
pub mod network;
pub mod ops;
pub mod persistence;
pub mod refinery;
pub mod runner;

pub use config::ScopeConfig;
pub use runner::{run, RunError, RunSummary};
