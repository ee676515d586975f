// * Pattern Grouper
// * Assigns every URL a pattern key and numbers the patterns that recur often enough.

use std::collections::HashMap;

use tracing::debug;

use super::normalization::{is_locale_code, NormalizedPath};
use crate::config::constants::GROUP_LABEL_PREFIX;

/// Grouping key computed for a single URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternKey {
    /// All path segments but the last, joined by `/` (full path when excluded)
    pub pattern: String,
    /// Locale-plus-filename URLs (`/fr/contact`) never join a group
    pub excluded: bool,
}

impl PatternKey {
    pub fn from_url(url: &str) -> Self {
        Self::from_normalized(&NormalizedPath::parse(url))
    }

    pub fn from_normalized(normalized: &NormalizedPath) -> Self {
        let segments = &normalized.segments;

        if segments.len() == 2 && is_locale_code(&segments[0]) {
            return Self {
                pattern: normalized.path.clone(),
                excluded: true,
            };
        }

        let pattern = match segments.len() {
            0 => String::new(),
            1 => segments[0].clone(),
            n => segments[..n - 1].join("/"),
        };

        Self {
            pattern,
            excluded: false,
        }
    }
}

// * Pattern for a URL, ignoring the exclusion rule
pub fn url_pattern(url: &str) -> String {
    PatternKey::from_url(url).pattern
}

/// Per-run pattern aggregate: counts, first-seen order and group labels.
///
/// Built once from the full record set. Labels are handed out in the order
/// each pattern was first seen in the input, never by count or alphabetically.
#[derive(Debug, Clone, Default)]
pub struct PatternGroups {
    order: Vec<String>,
    counts: HashMap<String, usize>,
    labels: HashMap<String, String>,
    threshold: usize,
}

impl PatternGroups {
    pub fn build<'a, I>(keys: I, threshold: usize) -> Self
    where
        I: IntoIterator<Item = &'a PatternKey>,
    {
        let mut order = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        // * Phase 1: count every non-excluded pattern, remembering first-seen order
        for key in keys {
            if key.excluded {
                continue;
            }
            let count = counts.entry(key.pattern.clone()).or_insert(0);
            if *count == 0 {
                order.push(key.pattern.clone());
            }
            *count += 1;
        }

        // * Phase 2: label patterns over the threshold, in first-seen order
        let mut labels = HashMap::new();
        let mut next_group = 1usize;
        for pattern in &order {
            if counts[pattern] >= threshold {
                let label = format!("{}{}", GROUP_LABEL_PREFIX, next_group);
                debug!(pattern = %pattern, count = counts[pattern], label = %label, "Pattern grouped");
                labels.insert(pattern.clone(), label);
                next_group += 1;
            }
        }

        Self {
            order,
            counts,
            labels,
            threshold,
        }
    }

    // * Group label for a key, or "" when below threshold or excluded
    pub fn label_for(&self, key: &PatternKey) -> &str {
        if key.excluded {
            return "";
        }
        self.labels.get(&key.pattern).map(String::as_str).unwrap_or("")
    }

    pub fn count(&self, pattern: &str) -> usize {
        self.counts.get(pattern).copied().unwrap_or(0)
    }

    pub fn group_count(&self) -> usize {
        self.labels.len()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Distinct non-excluded patterns in first-seen order with their count and label
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize, Option<&str>)> {
        self.order.iter().map(move |p| {
            (
                p.as_str(),
                self.counts[p],
                self.labels.get(p).map(String::as_str),
            )
        })
    }
}
