// * Classification Pipeline
// * Synchronous composition: normalize -> pattern/group -> locale -> template -> order.
// * All labels are decided from fully materialized aggregates before any record is touched.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::fingerprint::{BlockIndex, TemplateFingerprinter};
use super::grouping::{PatternGroups, PatternKey};
use super::locale::locale_of;
use super::normalization::NormalizedPath;
use super::ordering::{order_rows, Ordered};
use crate::config::constants::GROUP_THRESHOLD;
use crate::persistence::schema::UrlEntry;

/// One crawled page with every derived classification field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub url: String,
    pub source: String,
    pub pattern: String,
    pub excluded: bool,
    pub group: String,
    pub locale: String,
    pub template: String,
    pub template_details: String,
}

impl Ordered for UrlRecord {
    fn url(&self) -> &str {
        &self.url
    }

    fn group(&self) -> &str {
        &self.group
    }
}

/// Output of a classification run
#[derive(Debug, Clone)]
pub struct Classification {
    /// Records in final output order
    pub records: Vec<UrlRecord>,
    pub groups: PatternGroups,
    pub template_count: usize,
}

impl Classification {
    pub fn grouped_count(&self) -> usize {
        self.records.iter().filter(|r| !r.group.is_empty()).count()
    }
}

#[derive(Debug, Clone)]
pub struct Classifier {
    threshold: usize,
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            threshold: GROUP_THRESHOLD,
        }
    }

    pub fn with_threshold(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Classifies every entry; duplicates are kept as independent rows.
    ///
    /// Group and template numbering follow the order of `entries`; the returned
    /// records are then placed in final output order.
    pub fn classify(&self, entries: &[UrlEntry], blocks: &BlockIndex) -> Classification {
        let normalized: Vec<NormalizedPath> =
            entries.iter().map(|e| NormalizedPath::parse(&e.url)).collect();
        let keys: Vec<PatternKey> = normalized.iter().map(PatternKey::from_normalized).collect();

        // * Counting finishes before any label is handed out
        let groups = PatternGroups::build(&keys, self.threshold);

        let mut fingerprinter = TemplateFingerprinter::new();
        let templates = fingerprinter.assign(entries.iter().map(|e| e.url.as_str()), blocks);

        let mut records: Vec<UrlRecord> = entries
            .iter()
            .zip(normalized.iter())
            .zip(keys.iter())
            .zip(templates)
            .map(|(((entry, norm), key), template)| UrlRecord {
                url: entry.url.clone(),
                source: entry.source().to_string(),
                pattern: key.pattern.clone(),
                excluded: key.excluded,
                group: groups.label_for(key).to_string(),
                locale: locale_of(norm),
                template: template.template,
                template_details: template.template_details,
            })
            .collect();

        order_rows(&mut records);

        info!(
            urls = records.len(),
            groups = groups.group_count(),
            templates = fingerprinter.template_count(),
            "Classification complete"
        );

        Classification {
            records,
            groups,
            template_count: fingerprinter.template_count(),
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

// * Classifies with default settings
pub fn classify(entries: &[UrlEntry], blocks: &BlockIndex) -> Classification {
    Classifier::new().classify(entries, blocks)
}
