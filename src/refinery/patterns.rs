// * Pattern Summary
// * One row per distinct pattern: population, group label and member URLs

use std::cmp::Reverse;
use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::engine::pipeline::UrlRecord;

const URL_JOINER: &str = "; ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternSummaryRow {
    pub pattern: String,
    pub count: usize,
    pub group: String,
    pub is_common_pattern: bool,
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PatternSummary {
    pub rows: Vec<PatternSummaryRow>,
}

impl PatternSummary {
    /// Aggregates classified records by pattern.
    ///
    /// Excluded locale-filename URLs are summarised under their own full path
    /// and are never common, even if that path collides with a regular pattern.
    pub fn from_records(records: &[UrlRecord]) -> Self {
        let mut slots: HashMap<(&str, bool), usize> = HashMap::new();
        let mut rows: Vec<PatternSummaryRow> = Vec::new();

        for record in records {
            let key = (record.pattern.as_str(), record.excluded);
            let slot = *slots.entry(key).or_insert_with(|| {
                rows.push(PatternSummaryRow {
                    pattern: record.pattern.clone(),
                    count: 0,
                    group: String::new(),
                    is_common_pattern: false,
                    urls: Vec::new(),
                });
                rows.len() - 1
            });

            let row = &mut rows[slot];
            row.count += 1;
            row.urls.push(record.url.clone());
            if !record.group.is_empty() {
                row.group = record.group.clone();
                row.is_common_pattern = true;
            }
        }

        // * Common first, then by population, then alphabetically
        rows.sort_by_key(|r| (!r.is_common_pattern, Reverse(r.count), r.pattern.clone()));

        Self { rows }
    }

    pub fn common(&self) -> impl Iterator<Item = &PatternSummaryRow> {
        self.rows.iter().filter(|r| r.is_common_pattern)
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(["pattern", "count", "group", "is_common_pattern", "urls"])?;
        for row in &self.rows {
            out.write_record([
                row.pattern.as_str(),
                &row.count.to_string(),
                row.group.as_str(),
                &row.is_common_pattern.to_string(),
                &row.urls.join(URL_JOINER),
            ])?;
        }
        out.flush()?;
        Ok(())
    }
}
