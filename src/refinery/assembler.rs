// * Record Assembler
// * Joins classification records with optional content features into the fixed-column output table

use std::collections::HashMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use super::features::ContentFeatures;
use crate::engine::pipeline::UrlRecord;

const BASE_COLUMNS: &[&str] = &["url", "source", "group", "locale"];
const TEMPLATE_COLUMNS: &[&str] = &["template", "template_details"];
const CONTENT_COLUMNS: &[&str] = &[
    "has_forms",
    "form_count",
    "form_types",
    "form_details",
    "has_iframes",
    "iframe_count",
    "iframe_sources",
    "iframe_details",
    "iframe_forms_count",
    "iframe_with_forms_count",
    "iframe_forms_details",
    "scrape_status",
];

/// Which optional column blocks a table carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub templates: bool,
    pub content: bool,
}

impl TableSchema {
    /// Ordered column names: base, then template columns, then content columns
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = BASE_COLUMNS.to_vec();
        if self.templates {
            columns.extend_from_slice(TEMPLATE_COLUMNS);
        }
        if self.content {
            columns.extend_from_slice(CONTENT_COLUMNS);
        }
        columns
    }

    fn from_headers(headers: &csv::StringRecord) -> Self {
        let has = |name: &str| headers.iter().any(|h| h == name);
        Self {
            templates: has("template"),
            content: has("scrape_status"),
        }
    }
}

/// One emitted row. Helper fields (pattern, ranks) never reach this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub url: String,
    pub source: String,
    pub group: String,
    pub locale: String,
    pub template: String,
    pub template_details: String,
    pub content: Option<ContentFeatures>,
}

impl OutputRow {
    fn cells(&self, schema: TableSchema) -> Vec<String> {
        let mut cells = vec![
            self.url.clone(),
            self.source.clone(),
            self.group.clone(),
            self.locale.clone(),
        ];
        if schema.templates {
            cells.push(self.template.clone());
            cells.push(self.template_details.clone());
        }
        if schema.content {
            let c = self.content.clone().unwrap_or_default();
            cells.extend([
                c.has_forms.to_string(),
                c.form_count.to_string(),
                c.form_types,
                c.form_details,
                c.has_iframes.to_string(),
                c.iframe_count.to_string(),
                c.iframe_sources,
                c.iframe_details,
                c.iframe_forms_count.to_string(),
                c.iframe_with_forms_count.to_string(),
                c.iframe_forms_details,
                c.scrape_status.to_string(),
            ]);
        }
        cells
    }

    fn from_cells(record: &csv::StringRecord, index: &HashMap<String, usize>, schema: TableSchema) -> Self {
        let cell = |name: &str| -> String {
            index
                .get(name)
                .and_then(|&i| record.get(i))
                .unwrap_or("")
                .to_string()
        };
        let flag = |name: &str| cell(name).eq_ignore_ascii_case("true");
        let number = |name: &str| cell(name).trim().parse::<usize>().unwrap_or(0);

        let content = schema.content.then(|| ContentFeatures {
            has_forms: flag("has_forms"),
            form_count: number("form_count"),
            form_types: cell("form_types"),
            form_details: cell("form_details"),
            has_iframes: flag("has_iframes"),
            iframe_count: number("iframe_count"),
            iframe_sources: cell("iframe_sources"),
            iframe_details: cell("iframe_details"),
            iframe_forms_count: number("iframe_forms_count"),
            iframe_with_forms_count: number("iframe_with_forms_count"),
            iframe_forms_details: cell("iframe_forms_details"),
            scrape_status: cell("scrape_status").parse().unwrap_or_default(),
        });

        Self {
            url: cell("url"),
            source: cell("source"),
            group: cell("group"),
            locale: cell("locale"),
            template: cell("template"),
            template_details: cell("template_details"),
            content,
        }
    }
}

/// Final ordered table, one row per input URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputTable {
    pub schema: TableSchema,
    pub rows: Vec<OutputRow>,
}

impl OutputTable {
    pub fn columns(&self) -> Vec<&'static str> {
        self.schema.columns()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the table as CSV with a header row and no index column
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(self.columns())?;
        for row in &self.rows {
            out.write_record(row.cells(self.schema))?;
        }
        out.flush()?;
        Ok(())
    }

    /// Parses a table previously written by [`OutputTable::write_csv`]
    pub fn read_csv<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut input = csv::Reader::from_reader(reader);
        let headers = input.headers()?.clone();
        let schema = TableSchema::from_headers(&headers);
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.to_string(), i))
            .collect();

        let mut rows = Vec::new();
        for record in input.records() {
            rows.push(OutputRow::from_cells(&record?, &index, schema));
        }
        Ok(Self { schema, rows })
    }
}

/// Builds the output table from already-ordered records.
///
/// With `features` present every row carries the content columns; URLs the
/// scanner never reached get "not scraped" defaults.
pub fn assemble(
    records: &[UrlRecord],
    templates_enabled: bool,
    features: Option<&HashMap<String, ContentFeatures>>,
) -> OutputTable {
    let schema = TableSchema {
        templates: templates_enabled,
        content: features.is_some(),
    };

    let rows = records
        .iter()
        .map(|r| OutputRow {
            url: r.url.clone(),
            source: r.source.clone(),
            group: r.group.clone(),
            locale: r.locale.clone(),
            template: r.template.clone(),
            template_details: r.template_details.clone(),
            content: features.map(|f| f.get(&r.url).cloned().unwrap_or_else(ContentFeatures::not_scraped)),
        })
        .collect();

    OutputTable { schema, rows }
}
