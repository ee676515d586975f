use std::collections::HashMap;

use site_scope::engine::{classify, BlockIndex, UrlRecord};
use site_scope::persistence::UrlEntry;

// * Test Suite for Pattern Grouping and Row Ordering

fn run(urls: &[String]) -> Vec<UrlRecord> {
    let entries: Vec<UrlEntry> = urls.iter().map(|u| UrlEntry::new(u.as_str())).collect();
    classify(&entries, &BlockIndex::empty()).records
}

fn series(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("https://example.com/{}/page-{}", prefix, i)).collect()
}

#[test]
fn test_same_pattern_same_group() {
    let mut urls = series("blog", 6);
    urls.extend(series("docs/api", 5));
    let records = run(&urls);

    let mut by_pattern: HashMap<&str, &str> = HashMap::new();
    for r in &records {
        let label = by_pattern.entry(r.pattern.as_str()).or_insert(r.group.as_str());
        assert_eq!(*label, r.group);
        assert!(!r.group.is_empty());
    }
    assert_eq!(by_pattern.len(), 2);
}

#[test]
fn test_small_patterns_stay_ungrouped() {
    let records = run(&series("events", 4));
    assert!(records.iter().all(|r| r.group.is_empty()));
}

#[test]
fn test_labels_have_no_gaps() {
    let mut urls = series("a", 5);
    urls.extend(series("small", 2));
    urls.extend(series("b", 5));
    urls.extend(series("c", 7));
    let records = run(&urls);

    let mut labels: Vec<&str> = records.iter().map(|r| r.group.as_str()).filter(|g| !g.is_empty()).collect();
    labels.dedup();
    assert_eq!(labels, vec!["Group 1", "Group 2", "Group 3"]);

    // * First-seen order, not population order
    let c = records.iter().find(|r| r.pattern == "c").unwrap();
    assert_eq!(c.group, "Group 3");
}

#[test]
fn test_locale_filename_exclusion_overrides_threshold() {
    let urls: Vec<String> = ["fr/contact", "fr/about", "fr/team", "fr/jobs", "fr/legal"]
        .iter()
        .map(|p| format!("https://example.com/{}", p))
        .collect();
    let records = run(&urls);
    assert!(records.iter().all(|r| r.group.is_empty()));
    assert!(records.iter().all(|r| r.excluded));
}

#[test]
fn test_locale_filename_excluded_even_when_repeated() {
    let urls: Vec<String> = (0..5).map(|_| "https://example.com/fr/contact".to_string()).collect();
    let records = run(&urls);
    assert!(records.iter().all(|r| r.group.is_empty()));
}

#[test]
fn test_longer_locale_patterns_group_normally() {
    let urls = series("fr/contact/details", 5)
        .into_iter()
        .map(|u| u.replace("/page-", "-"))
        .collect::<Vec<_>>();
    // * fr/contact/details-N -> pattern "fr/contact"
    let records = run(&urls);
    assert!(records.iter().all(|r| r.pattern == "fr/contact"));
    assert!(records.iter().all(|r| r.group == "Group 1"));
}

#[test]
fn test_sort_order_example() {
    let urls: Vec<String> = ["https://ex.com/b", "https://ex.com/", "https://ex.com/a"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let order: Vec<String> = run(&urls).into_iter().map(|r| r.url).collect();
    assert_eq!(order, vec!["https://ex.com/", "https://ex.com/a", "https://ex.com/b"]);
}

#[test]
fn test_grouped_rows_before_ungrouped() {
    let mut urls = vec!["https://example.com/aaa".to_string()];
    urls.extend(series("zzz", 5));
    urls.push("https://example.com/".to_string());
    let records = run(&urls);

    assert_eq!(records[0].url, "https://example.com/");
    assert!(records[1..6].iter().all(|r| r.group == "Group 1"));
    assert_eq!(records[6].url, "https://example.com/aaa");
}

#[test]
fn test_groups_sorted_numerically() {
    let mut urls = Vec::new();
    for i in 0..10 {
        urls.extend(series(&format!("s{}", i), 5));
    }
    let records = run(&urls);
    let mut seen: Vec<&str> = records.iter().map(|r| r.group.as_str()).collect();
    seen.dedup();
    assert_eq!(seen.last(), Some(&"Group 10"));
    assert_eq!(seen[8], "Group 9");
}
