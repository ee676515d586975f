// * Template Fingerprinting
// * Derives a per-URL "rendered block set" from the block inventory and numbers identical sets

use std::collections::HashMap;

use tracing::debug;

use crate::config::constants::{
    TEMPLATE_DETAILS_SEPARATOR, TEMPLATE_LABEL_PREFIX, UNKNOWN_BLOCK_NAME,
};
use crate::persistence::schema::BlockInventory;

/// Index of block names by the URL they render on.
///
/// Built once per run so each URL lookup is a single hash probe instead of a
/// scan over every block and instance. Instance URLs are matched verbatim:
/// no scheme or trailing-slash normalization is applied.
#[derive(Debug, Clone, Default)]
pub struct BlockIndex {
    by_url: HashMap<String, Vec<String>>,
}

impl BlockIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_inventory(inventory: &BlockInventory) -> Self {
        let mut by_url: HashMap<String, Vec<String>> = HashMap::new();

        for block in &inventory.blocks {
            let name = block.identifier();
            if is_unknown(&name) {
                continue;
            }

            for instance in &block.instances {
                let Some(url) = instance.url.as_deref() else {
                    continue;
                };
                let names = by_url.entry(url.to_string()).or_default();
                // * De-duplicate while keeping first-encountered block order
                if !names.iter().any(|n| n == &name) {
                    names.push(name.clone());
                }
            }
        }

        debug!(urls = by_url.len(), "Block index built");
        Self { by_url }
    }

    pub fn is_empty(&self) -> bool {
        self.by_url.is_empty()
    }

    /// Block names rendered on `url`, in first-encountered order
    pub fn blocks_for(&self, url: &str) -> &[String] {
        self.by_url.get(url).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Comma-joined block names for `url`, empty when none render there
    pub fn template_details(&self, url: &str) -> String {
        self.blocks_for(url).join(TEMPLATE_DETAILS_SEPARATOR)
    }
}

fn is_unknown(name: &str) -> bool {
    name.trim().is_empty() || name.trim().eq_ignore_ascii_case(UNKNOWN_BLOCK_NAME)
}

/// Template label and details for one URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateAssignment {
    pub template: String,
    pub template_details: String,
}

/// Numbers distinct `template_details` values in first-encountered order
#[derive(Debug, Default)]
pub struct TemplateFingerprinter {
    labels: HashMap<String, String>,
}

impl TemplateFingerprinter {
    pub fn new() -> Self {
        Self::default()
    }

    // * Assigns templates to URLs in the order given; that order fixes the numbering
    pub fn assign<'a, I>(&mut self, urls: I, index: &BlockIndex) -> Vec<TemplateAssignment>
    where
        I: IntoIterator<Item = &'a str>,
    {
        urls.into_iter()
            .map(|url| self.assign_one(&index.template_details(url)))
            .collect()
    }

    fn assign_one(&mut self, details: &str) -> TemplateAssignment {
        if details.is_empty() {
            return TemplateAssignment::default();
        }

        let next = self.labels.len() + 1;
        let template = self
            .labels
            .entry(details.to_string())
            .or_insert_with(|| format!("{}{}", TEMPLATE_LABEL_PREFIX, next))
            .clone();

        TemplateAssignment {
            template,
            template_details: details.to_string(),
        }
    }

    pub fn template_count(&self) -> usize {
        self.labels.len()
    }
}

// * One-shot helper: fresh numbering over `urls`
pub fn assign_templates<'a, I>(urls: I, index: &BlockIndex) -> Vec<TemplateAssignment>
where
    I: IntoIterator<Item = &'a str>,
{
    TemplateFingerprinter::new().assign(urls, index)
}
