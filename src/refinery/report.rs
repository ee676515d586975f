// * Report Synthesizer
// * Aggregates an assembled table into a markdown scoping report. Pure formatting, no classification.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use super::assembler::OutputTable;
use crate::config::constants::{CROSS_GROUP_TEMPLATE_MIN, GROUP_THRESHOLD};
use crate::engine::ordering::group_rank;

/// Header facts that do not come from the table
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub customer: String,
    pub domain: String,
    pub generated_at: DateTime<Utc>,
}

impl ReportContext {
    pub fn new(customer: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            customer: customer.into(),
            domain: domain.into(),
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocaleShare {
    pub locale: String,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupBreakdown {
    pub group: String,
    pub population: usize,
    /// (template label, page count), most used first
    pub templates: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossGroupTemplate {
    pub template: String,
    pub groups: Vec<String>,
    pub population: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentStats {
    pub scanned: usize,
    pub fetched: usize,
    pub with_forms: usize,
    pub with_iframe_forms: usize,
    pub form_types: Vec<(String, usize)>,
    pub statuses: Vec<(String, usize)>,
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub context: ReportContext,
    pub total: usize,
    pub locales: Vec<LocaleShare>,
    pub grouped: usize,
    pub ungrouped: usize,
    pub group_count: usize,
    pub groups: Vec<GroupBreakdown>,
    pub cross_group: Vec<CrossGroupTemplate>,
    pub ungrouped_templates: Vec<(String, usize)>,
    pub content: Option<ContentStats>,
}

// * Sorts a tally most-frequent first, ties alphabetical
fn ranked(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut items: Vec<(String, usize)> = counts.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    items
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

impl AnalysisReport {
    pub fn from_table(table: &OutputTable, context: ReportContext) -> Self {
        let total = table.len();

        let mut locale_counts: HashMap<String, usize> = HashMap::new();
        for row in &table.rows {
            *locale_counts.entry(row.locale.clone()).or_insert(0) += 1;
        }
        let locales = ranked(locale_counts)
            .into_iter()
            .map(|(locale, count)| LocaleShare {
                percent: percent(count, total),
                locale,
                count,
            })
            .collect();

        // * group -> template -> pages; BTreeMap keyed by rank keeps "Group 10" after "Group 9"
        let mut by_group: BTreeMap<(u64, String), HashMap<String, usize>> = BTreeMap::new();
        let mut group_sizes: HashMap<String, usize> = HashMap::new();
        let mut ungrouped_counts: HashMap<String, usize> = HashMap::new();
        let mut grouped = 0usize;

        for row in &table.rows {
            if row.group.is_empty() {
                if table.schema.templates && !row.template.is_empty() {
                    *ungrouped_counts.entry(row.template.clone()).or_insert(0) += 1;
                }
                continue;
            }
            grouped += 1;
            *group_sizes.entry(row.group.clone()).or_insert(0) += 1;
            let templates = by_group
                .entry((group_rank(&row.group), row.group.clone()))
                .or_default();
            if !row.template.is_empty() {
                *templates.entry(row.template.clone()).or_insert(0) += 1;
            }
        }

        let group_count = by_group.len();

        let groups = if table.schema.templates {
            by_group
                .iter()
                .filter(|((_, g), _)| group_sizes[g] >= GROUP_THRESHOLD)
                .map(|((_, g), t)| GroupBreakdown {
                    group: g.clone(),
                    population: group_sizes[g],
                    templates: ranked(t.clone()),
                })
                .collect()
        } else {
            Vec::new()
        };

        let cross_group = if table.schema.templates {
            cross_group_templates(&by_group)
        } else {
            Vec::new()
        };

        let content = table.schema.content.then(|| content_stats(table));

        Self {
            context,
            total,
            locales,
            grouped,
            ungrouped: total - grouped,
            group_count,
            groups,
            cross_group,
            ungrouped_templates: ranked(ungrouped_counts),
            content,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let ctx = &self.context;

        let _ = writeln!(out, "# Site Scoping Report: {}", ctx.domain);
        let _ = writeln!(out);
        if !ctx.customer.is_empty() {
            let _ = writeln!(out, "- Customer: {}", ctx.customer);
        }
        let _ = writeln!(out, "- Generated: {}", ctx.generated_at.format("%Y-%m-%d %H:%M UTC"));
        let _ = writeln!(out, "- Total pages: {}", self.total);
        let _ = writeln!(out);

        let _ = writeln!(out, "## Locales");
        let _ = writeln!(out);
        let _ = writeln!(out, "| locale | pages | share |");
        let _ = writeln!(out, "|---|---|---|");
        for share in &self.locales {
            let _ = writeln!(out, "| {} | {} | {:.1}% |", share.locale, share.count, share.percent);
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "## Grouping");
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "- Grouped pages: {} ({:.1}%) across {} groups",
            self.grouped,
            percent(self.grouped, self.total),
            self.group_count
        );
        let _ = writeln!(
            out,
            "- Ungrouped pages: {} ({:.1}%)",
            self.ungrouped,
            percent(self.ungrouped, self.total)
        );
        let _ = writeln!(out);

        if !self.groups.is_empty() {
            let _ = writeln!(out, "## Templates per Group");
            let _ = writeln!(out);
            for group in &self.groups {
                let _ = writeln!(out, "### {} ({} pages)", group.group, group.population);
                if group.templates.is_empty() {
                    let _ = writeln!(out, "- no template data");
                }
                for (template, count) in &group.templates {
                    let _ = writeln!(out, "- {}: {} pages", template, count);
                }
                let _ = writeln!(out);
            }
        }

        if !self.cross_group.is_empty() {
            let _ = writeln!(out, "## Cross-Group Templates");
            let _ = writeln!(out);
            for item in &self.cross_group {
                let _ = writeln!(
                    out,
                    "- {} spans {} ({} pages): these groups likely share one layout",
                    item.template,
                    item.groups.join(", "),
                    item.population
                );
            }
            let _ = writeln!(out);
        }

        if !self.ungrouped_templates.is_empty() {
            let _ = writeln!(out, "## Ungrouped Template Diversity");
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{} distinct templates across {} ungrouped pages",
                self.ungrouped_templates.len(),
                self.ungrouped
            );
            let _ = writeln!(out);
            for (template, count) in &self.ungrouped_templates {
                let _ = writeln!(out, "- {}: {} pages", template, count);
            }
            let _ = writeln!(out);
        }

        if let Some(stats) = &self.content {
            let _ = writeln!(out, "## Forms and Iframes");
            let _ = writeln!(out);
            let _ = writeln!(out, "- Pages fetched: {} of {}", stats.fetched, stats.scanned);
            let _ = writeln!(
                out,
                "- Pages with forms: {} ({:.1}%)",
                stats.with_forms,
                percent(stats.with_forms, stats.scanned)
            );
            let _ = writeln!(
                out,
                "- Pages with forms inside iframes: {} ({:.1}%)",
                stats.with_iframe_forms,
                percent(stats.with_iframe_forms, stats.scanned)
            );
            for (kind, count) in &stats.form_types {
                let _ = writeln!(out, "- {} forms: {} pages", kind, count);
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "| scrape status | pages |");
            let _ = writeln!(out, "|---|---|");
            for (status, count) in &stats.statuses {
                let _ = writeln!(out, "| {} | {} |", status, count);
            }
        }

        out
    }
}

fn cross_group_templates(
    by_group: &BTreeMap<(u64, String), HashMap<String, usize>>,
) -> Vec<CrossGroupTemplate> {
    let mut spans: HashMap<&str, (BTreeSet<(u64, &str)>, usize)> = HashMap::new();
    for ((rank, group), templates) in by_group {
        for (template, count) in templates {
            let entry = spans.entry(template.as_str()).or_default();
            entry.0.insert((*rank, group.as_str()));
            entry.1 += count;
        }
    }

    let mut items: Vec<CrossGroupTemplate> = spans
        .into_iter()
        .filter(|(_, (groups, population))| groups.len() >= 2 && *population > CROSS_GROUP_TEMPLATE_MIN)
        .map(|(template, (groups, population))| CrossGroupTemplate {
            template: template.to_string(),
            groups: groups.into_iter().map(|(_, g)| g.to_string()).collect(),
            population,
        })
        .collect();
    items.sort_by(|a, b| b.population.cmp(&a.population).then_with(|| a.template.cmp(&b.template)));
    items
}

fn content_stats(table: &OutputTable) -> ContentStats {
    let mut stats = ContentStats {
        scanned: table.len(),
        ..Default::default()
    };
    let mut form_types: HashMap<String, usize> = HashMap::new();
    let mut statuses: HashMap<String, usize> = HashMap::new();

    for content in table.rows.iter().filter_map(|r| r.content.as_ref()) {
        if content.scrape_status.is_fetched() {
            stats.fetched += 1;
        }
        if content.has_forms {
            stats.with_forms += 1;
        }
        if content.has_iframes {
            stats.with_iframe_forms += 1;
        }
        for kind in content.form_type_list() {
            *form_types.entry(kind.to_string()).or_insert(0) += 1;
        }
        *statuses.entry(content.scrape_status.to_string()).or_insert(0) += 1;
    }

    stats.form_types = ranked(form_types);
    stats.statuses = ranked(statuses);
    stats
}
