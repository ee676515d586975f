use site_scope::engine::{assign_templates, BlockIndex};
use site_scope::persistence::BlockInventory;

// * Test Suite for Template Fingerprinting

const BLOCKS: &str = r#"{
    "blocks": [
        {"name": "header", "instances": [
            {"url": "https://example.com/a"},
            {"url": "https://example.com/b"},
            {"url": "https://example.com/c"}
        ]},
        {"name": "hero", "instances": [
            {"url": "https://example.com/a"},
            {"url": "https://example.com/c"}
        ]},
        {"name": "unknown", "instances": [
            {"url": "https://example.com/b"}
        ]},
        {"id": 42, "instances": [
            {"url": "https://example.com/d"}
        ]}
    ]
}"#;

fn index() -> BlockIndex {
    BlockIndex::from_inventory(&BlockInventory::from_json_str(BLOCKS).unwrap())
}

const URLS: [&str; 5] = [
    "https://example.com/a",
    "https://example.com/b",
    "https://example.com/c",
    "https://example.com/d",
    "https://example.com/e",
];

#[test]
fn test_identical_block_sets_share_template() {
    let out = assign_templates(URLS, &index());
    assert_eq!(out[0].template, "Template 1");
    assert_eq!(out[0].template_details, "header, hero");
    assert_eq!(out[1].template, "Template 2");
    assert_eq!(out[1].template_details, "header");
    assert_eq!(out[2].template, "Template 1");
}

#[test]
fn test_numeric_id_used_when_name_missing() {
    let out = assign_templates(URLS, &index());
    assert_eq!(out[3].template_details, "42");
    assert_eq!(out[3].template, "Template 3");
}

#[test]
fn test_url_without_blocks_has_no_template() {
    let out = assign_templates(URLS, &index());
    assert!(out[4].template.is_empty());
    assert!(out[4].template_details.is_empty());
}

#[test]
fn test_assignment_is_deterministic() {
    let first = assign_templates(URLS, &index());
    let second = assign_templates(URLS, &index());
    assert_eq!(first, second);
}

#[test]
fn test_block_urls_matched_verbatim() {
    let out = assign_templates(["https://example.com/a/", "http://example.com/a"], &index());
    assert!(out.iter().all(|t| t.template.is_empty()));
}

#[test]
fn test_empty_index() {
    let out = assign_templates(URLS, &BlockIndex::empty());
    assert!(out.iter().all(|t| t.template.is_empty() && t.template_details.is_empty()));
}
