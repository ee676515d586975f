// * Input Schemas for the URL and Block Inventories
// * Both inventories are read once per run and never mutated

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::constants::UNKNOWN_BLOCK_NAME;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Crawled URL inventory for one site
///
/// # Fields
/// - `origin_url`: Site origin, used to name output files
/// - `customer_name`: Customer the site belongs to
/// - `urls`: One entry per crawled page, in crawl order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlInventory {
    #[serde(default, alias = "origin", alias = "origin_url")]
    pub origin_url: Option<String>,
    #[serde(default, alias = "customer", alias = "customer_name")]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub urls: Vec<UrlEntry>,
}

impl UrlInventory {
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let text = read(path)?;
        serde_json::from_str(&text).map_err(|source| SchemaError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn customer(&self) -> &str {
        self.customer_name.as_deref().unwrap_or("")
    }

    pub fn first_url(&self) -> Option<&str> {
        self.urls.first().map(|e| e.url.as_str())
    }
}

/// A single crawled page. Extra provenance fields (`targetPath`, `id`, ...)
/// are kept but never used by classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlEntry {
    pub url: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub source: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl UrlEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or("")
    }
}

// * Scalars are stringified; arrays, objects and null read as absent
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Content-block inventory: which named blocks render on which URLs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockInventory {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl BlockInventory {
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let text = read(path)?;
        serde_json::from_str(&text).map_err(|source| SchemaError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn instance_count(&self) -> usize {
        self.blocks.iter().map(|b| b.instances.len()).sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, alias = "blockName", alias = "block_name")]
    pub name: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub instances: Vec<BlockInstance>,
}

impl Block {
    // * Name if present, else id, else the "unknown" sentinel
    pub fn identifier(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        match &self.id {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => UNKNOWN_BLOCK_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockInstance {
    #[serde(default)]
    pub url: Option<String>,
}

fn read(path: &Path) -> Result<String, SchemaError> {
    fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_inventory_parsing() {
        let inventory = UrlInventory::from_json_str(
            r#"{
                "originUrl": "https://www.example.com",
                "customerName": "Example Corp",
                "urls": [
                    {"url": "https://www.example.com/", "source": "sitemap", "targetPath": "/", "id": 1},
                    {"url": "https://www.example.com/about"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(inventory.origin_url.as_deref(), Some("https://www.example.com"));
        assert_eq!(inventory.customer(), "Example Corp");
        assert_eq!(inventory.urls.len(), 2);
        assert_eq!(inventory.urls[0].source(), "sitemap");
        assert!(inventory.urls[0].extra.contains_key("targetPath"));
        assert_eq!(inventory.urls[1].source(), "");
    }

    #[test]
    fn test_missing_fields_default() {
        let inventory = UrlInventory::from_json_str(r#"{"urls": [{"url": "https://ex.com/a", "source": null}]}"#).unwrap();
        assert!(inventory.origin_url.is_none());
        assert_eq!(inventory.customer(), "");
        assert_eq!(inventory.urls[0].source(), "");
    }

    #[test]
    fn test_non_string_source_is_tolerated() {
        let inventory = UrlInventory::from_json_str(
            r#"{"urls": [
                {"url": "https://ex.com/a", "source": 7},
                {"url": "https://ex.com/b", "source": true},
                {"url": "https://ex.com/c", "source": ["sitemap"]},
                {"url": "https://ex.com/d", "source": {"kind": "crawl"}}
            ]}"#,
        )
        .unwrap();
        let sources: Vec<&str> = inventory.urls.iter().map(|e| e.source()).collect();
        assert_eq!(sources, vec!["7", "true", "", ""]);
    }

    #[test]
    fn test_url_is_required() {
        assert!(UrlInventory::from_json_str(r#"{"urls": [{"source": "crawl"}]}"#).is_err());
    }

    #[test]
    fn test_block_identifier_fallbacks() {
        let inventory = BlockInventory::from_json_str(
            r#"{"blocks": [
                {"name": "hero", "instances": []},
                {"id": 42, "instances": [{"url": "https://ex.com/"}]},
                {"blockName": "  ", "id": "cta", "instances": [{}]},
                {"instances": [{"url": "https://ex.com/"}]}
            ]}"#,
        )
        .unwrap();

        let ids: Vec<String> = inventory.blocks.iter().map(Block::identifier).collect();
        assert_eq!(ids, vec!["hero", "42", "cta", "unknown"]);
        assert_eq!(inventory.instance_count(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = UrlInventory::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
    }
}
