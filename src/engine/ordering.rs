// * Ordering Stage
// * Homepage first, then grouped rows by group number, then ungrouped rows; URL order within each.

use std::cmp::Ordering;

use super::normalization::NormalizedPath;
use crate::config::constants::{GROUP_LABEL_PREFIX, UNGROUPED_RANK};

// * Numeric N from "Group N"; anything else sorts after every real group
pub fn group_rank(group: &str) -> u64 {
    group
        .strip_prefix(GROUP_LABEL_PREFIX)
        .and_then(|n| n.trim().parse::<u64>().ok())
        .unwrap_or(UNGROUPED_RANK)
}

/// Sort key for one row: `(not_homepage, group_rank, url)`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RowKey<'a> {
    not_homepage: bool,
    rank: u64,
    url: &'a str,
}

impl<'a> RowKey<'a> {
    pub fn new(url: &'a str, group: &str) -> Self {
        Self {
            not_homepage: !NormalizedPath::parse(url).is_homepage(),
            rank: group_rank(group),
            url,
        }
    }
}

pub fn compare_rows(a_url: &str, a_group: &str, b_url: &str, b_group: &str) -> Ordering {
    RowKey::new(a_url, a_group).cmp(&RowKey::new(b_url, b_group))
}

/// Rows that can be placed in final output order
pub trait Ordered {
    fn url(&self) -> &str;
    fn group(&self) -> &str;
}

// * Stable sort into final output order
pub fn order_rows<T: Ordered>(rows: &mut [T]) {
    rows.sort_by(|a, b| compare_rows(a.url(), a.group(), b.url(), b.group()));
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl Ordered for Row {
        fn url(&self) -> &str {
            self.0
        }
        fn group(&self) -> &str {
            self.1
        }
    }

    fn urls(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.0).collect()
    }

    #[test]
    fn test_group_rank() {
        assert_eq!(group_rank("Group 3"), 3);
        assert_eq!(group_rank("Group 12"), 12);
        assert_eq!(group_rank(""), UNGROUPED_RANK);
        assert_eq!(group_rank("Template 1"), UNGROUPED_RANK);
    }

    #[test]
    fn test_homepage_pinned_first() {
        let mut rows = vec![
            Row("https://ex.com/b", ""),
            Row("https://ex.com/", ""),
            Row("https://ex.com/a", ""),
        ];
        order_rows(&mut rows);
        assert_eq!(urls(&rows), vec!["https://ex.com/", "https://ex.com/a", "https://ex.com/b"]);
    }

    #[test]
    fn test_groups_numeric_then_ungrouped() {
        let mut rows = vec![
            Row("https://ex.com/z", ""),
            Row("https://ex.com/g10/b", "Group 10"),
            Row("https://ex.com/g2/b", "Group 2"),
            Row("https://ex.com/g2/a", "Group 2"),
            Row("https://ex.com/a", ""),
            Row("https://ex.com/index.html", ""),
        ];
        order_rows(&mut rows);
        assert_eq!(
            urls(&rows),
            vec![
                "https://ex.com/index.html",
                "https://ex.com/g2/a",
                "https://ex.com/g2/b",
                "https://ex.com/g10/b",
                "https://ex.com/a",
                "https://ex.com/z",
            ]
        );
    }

    #[test]
    fn test_grouped_homepage_still_first() {
        let mut rows = vec![
            Row("https://ex.com/news/a", "Group 1"),
            Row("https://ex.com/", "Group 2"),
        ];
        order_rows(&mut rows);
        assert_eq!(rows[0].0, "https://ex.com/");
    }
}
