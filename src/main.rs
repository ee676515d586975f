use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use site_scope::config::constants::{
    DEFAULT_OUTPUT_DIR, DEFAULT_SCRAPE_CONCURRENCY, DEFAULT_SCRAPE_TIMEOUT_SECS, GROUP_THRESHOLD,
};
use site_scope::engine::{extract_locale, NormalizedPath, PatternKey};
use site_scope::ops::telemetry;
use site_scope::persistence::OutputPaths;
use site_scope::refinery::ReportContext;
use site_scope::{runner, ScopeConfig};

#[derive(Parser)]
#[command(name = "site-scope", version, about = "Group, localise and template-fingerprint a crawled site")]
struct Cli {
    /// Human-readable logs instead of JSON
    #[arg(long, global = true, env = "SITE_SCOPE_PRETTY")]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a URL inventory and write the scoping table
    Run(RunArgs),
    /// Show how individual URLs are normalized and classified
    Inspect {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Rebuild the analysis report from an existing table
    Report {
        /// Table written by a previous run
        table: PathBuf,
        /// Report destination (default: next to the table)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, default_value = "")]
        customer: String,
        /// Site domain shown in the report heading
        #[arg(long, default_value = "site")]
        domain: String,
    },
}

#[derive(Args)]
struct RunArgs {
    /// URL inventory JSON
    #[arg(short, long, env = "SITE_SCOPE_URLS")]
    urls: PathBuf,

    /// Block inventory JSON; enables template columns
    #[arg(short, long, env = "SITE_SCOPE_BLOCKS")]
    blocks: Option<PathBuf>,

    #[arg(short, long, env = "SITE_SCOPE_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Overrides the customer name in the inventory
    #[arg(long, env = "SITE_SCOPE_CUSTOMER")]
    customer: Option<String>,

    #[arg(long, env = "SITE_SCOPE_GROUP_THRESHOLD", default_value_t = GROUP_THRESHOLD)]
    group_threshold: usize,

    /// Fetch every page and record form/iframe presence
    #[arg(long, env = "SITE_SCOPE_SCRAPE")]
    scrape: bool,

    #[arg(long, env = "SITE_SCOPE_SCRAPE_CONCURRENCY", default_value_t = DEFAULT_SCRAPE_CONCURRENCY)]
    scrape_concurrency: usize,

    #[arg(long, env = "SITE_SCOPE_SCRAPE_TIMEOUT", default_value_t = DEFAULT_SCRAPE_TIMEOUT_SECS)]
    scrape_timeout_secs: u64,

    /// Write the markdown analysis report
    #[arg(long, env = "SITE_SCOPE_REPORT")]
    report: bool,

    /// Write the pattern summary table
    #[arg(long, env = "SITE_SCOPE_PATTERN_SUMMARY")]
    pattern_summary: bool,

    /// Do not copy the input files into the output folder
    #[arg(long, env = "SITE_SCOPE_NO_COPY_SOURCES")]
    no_copy_sources: bool,

    /// Write Prometheus metrics here at the end of the run
    #[arg(long, env = "SITE_SCOPE_METRICS_PATH")]
    metrics_path: Option<PathBuf>,
}

impl From<RunArgs> for ScopeConfig {
    fn from(args: RunArgs) -> Self {
        ScopeConfig {
            urls_path: args.urls,
            blocks_path: args.blocks,
            output_dir: args.output_dir,
            customer: args.customer,
            group_threshold: args.group_threshold,
            scrape: args.scrape,
            scrape_concurrency: args.scrape_concurrency,
            scrape_timeout_secs: args.scrape_timeout_secs,
            report: args.report,
            pattern_summary: args.pattern_summary,
            copy_sources: !args.no_copy_sources,
            metrics_path: args.metrics_path,
        }
    }
}

fn inspect(urls: &[String]) {
    for url in urls {
        let normalized = NormalizedPath::parse(url);
        let key = PatternKey::from_normalized(&normalized);
        println!("{}", url);
        println!("  host:     {}", normalized.host);
        println!("  segments: {}", normalized.segments.join(" / "));
        println!("  pattern:  {}", key.pattern);
        println!("  excluded: {}", key.excluded);
        println!("  homepage: {}", normalized.is_homepage());
        println!("  locale:   {}", extract_locale(url));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.pretty {
        telemetry::init_tracing_pretty();
    } else {
        telemetry::init_tracing();
    }

    match cli.command {
        Commands::Run(args) => {
            let config = ScopeConfig::from(args);
            let summary = runner::run(&config)
                .await
                .with_context(|| format!("run over {} failed", config.urls_path.display()))?;

            println!(
                "{}: {} URLs, {} grouped into {} groups, {} templates",
                summary.domain, summary.rows, summary.grouped, summary.groups, summary.templates
            );
            println!("Table: {}", summary.table_path.display());
            if let Some(path) = &summary.patterns_path {
                println!("Patterns: {}", path.display());
            }
            if let Some(path) = &summary.report_path {
                println!("Report: {}", path.display());
            }
        }
        Commands::Inspect { urls } => inspect(&urls),
        Commands::Report {
            table,
            output,
            customer,
            domain,
        } => {
            let output = output.unwrap_or_else(|| OutputPaths::report_for_table(&table));
            let rows = runner::regenerate_report(&table, &output, ReportContext::new(customer, domain))
                .with_context(|| format!("could not rebuild report from {}", table.display()))?;
            println!("Report for {} rows: {}", rows.len(), output.display());
        }
    }

    Ok(())
}
