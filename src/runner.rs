// * Run Orchestration
// * load -> classify -> (scan) -> assemble -> export, driven entirely by a ScopeConfig

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ConfigError, ScopeConfig};
use crate::engine::{site_domain, BlockIndex, Classifier};
use crate::network::{ContentScanner, NetworkError};
use crate::ops::telemetry;
use crate::persistence::export::{self, ExportError, OutputPaths};
use crate::persistence::schema::{BlockInventory, SchemaError, UrlInventory};
use crate::refinery::{assemble, AnalysisReport, OutputTable, PatternSummary, ReportContext};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load URL inventory: {0}")]
    Schema(#[from] SchemaError),

    #[error("Failed to write output: {0}")]
    Export(#[from] ExportError),

    #[error("Failed to start content scanner: {0}")]
    Scanner(#[from] NetworkError),
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub domain: String,
    pub customer: String,
    pub rows: usize,
    pub grouped: usize,
    pub groups: usize,
    pub templates: usize,
    pub scraped: bool,
    pub table_path: PathBuf,
    pub report_path: Option<PathBuf>,
    pub patterns_path: Option<PathBuf>,
}

fn load_blocks(path: &Path) -> BlockIndex {
    match BlockInventory::load(path) {
        Ok(inventory) => {
            info!(
                path = %path.display(),
                blocks = inventory.blocks.len(),
                instances = inventory.instance_count(),
                "Block inventory loaded"
            );
            BlockIndex::from_inventory(&inventory)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Block inventory unavailable, templates left empty");
            BlockIndex::empty()
        }
    }
}

/// Runs one full classification over the configured inventories
pub async fn run(config: &ScopeConfig) -> Result<RunSummary, RunError> {
    config.validate()?;

    let inventory = UrlInventory::load(&config.urls_path)?;
    info!(
        path = %config.urls_path.display(),
        urls = inventory.urls.len(),
        "URL inventory loaded"
    );

    let templates_enabled = config.blocks_path.is_some();
    let blocks = match &config.blocks_path {
        Some(path) => load_blocks(path),
        None => BlockIndex::empty(),
    };

    let classification = Classifier::with_threshold(config.group_threshold).classify(&inventory.urls, &blocks);
    telemetry::record_classification(
        classification.records.len(),
        classification.groups.group_count(),
        classification.template_count,
    );

    // * The scanner only ever adds columns; classification is already final here
    let features = if config.scrape {
        let scanner = ContentScanner::new(
            config.scrape_concurrency,
            Duration::from_secs(config.scrape_timeout_secs),
        )?;
        Some(scanner.scan(inventory.urls.iter().map(|e| e.url.clone())).await)
    } else {
        None
    };

    let table = assemble(&classification.records, templates_enabled, features.as_ref());

    let domain = site_domain(inventory.origin_url.as_deref(), inventory.first_url());
    let customer = config
        .customer
        .clone()
        .unwrap_or_else(|| inventory.customer().to_string());
    let paths = OutputPaths::new(&config.output_dir, &domain);

    export::ensure_output_dir(&paths.dir)?;
    export::write_table(&table, &paths.table)?;
    telemetry::record_rows_exported(table.len());

    let patterns_path = if config.pattern_summary {
        let summary = PatternSummary::from_records(&classification.records);
        export::write_patterns(&summary, &paths.patterns)?;
        Some(paths.patterns.clone())
    } else {
        None
    };

    let report_path = if config.report {
        let report = AnalysisReport::from_table(&table, ReportContext::new(&customer, &domain));
        export::write_text(&report.render(), &paths.report)?;
        Some(paths.report.clone())
    } else {
        None
    };

    if config.copy_sources {
        let mut sources = vec![config.urls_path.as_path()];
        if let Some(blocks_path) = config.blocks_path.as_deref().filter(|p| p.exists()) {
            sources.push(blocks_path);
        }
        export::copy_sources(&sources, &paths.dir)?;
    }

    if let Some(metrics_path) = &config.metrics_path {
        export::write_text(&telemetry::get_metrics_string(), metrics_path)?;
    }

    let summary = RunSummary {
        domain,
        customer,
        rows: table.len(),
        grouped: classification.grouped_count(),
        groups: classification.groups.group_count(),
        templates: classification.template_count,
        scraped: features.is_some(),
        table_path: paths.table,
        report_path,
        patterns_path,
    };

    info!(
        domain = %summary.domain,
        rows = summary.rows,
        groups = summary.groups,
        templates = summary.templates,
        "Run complete"
    );

    Ok(summary)
}

/// Rebuilds the analysis report from a previously written table
pub fn regenerate_report(
    table_path: &Path,
    output: &Path,
    context: ReportContext,
) -> Result<OutputTable, RunError> {
    let table = export::read_table(table_path)?;
    let report = AnalysisReport::from_table(&table, context);
    export::write_text(&report.render(), output)?;
    Ok(table)
}
