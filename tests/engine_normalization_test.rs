use site_scope::engine::normalization::{is_locale_code, path_segments, site_domain, NormalizedPath};

// * Test Suite for Path Normalization

#[test]
fn test_scheme_and_www_stripped() {
    let n = NormalizedPath::parse("https://www.example.com/blog/post");
    assert_eq!(n.host, "example.com");
    assert_eq!(n.segments, vec!["blog", "post"]);
}

#[test]
fn test_http_scheme() {
    let n = NormalizedPath::parse("http://example.com/a/b/c");
    assert_eq!(n.path, "a/b/c");
}

#[test]
fn test_trailing_slashes_ignored() {
    assert_eq!(path_segments("https://example.com/blog/post/"), vec!["blog", "post"]);
    assert_eq!(path_segments("https://example.com//blog//"), vec!["blog"]);
}

#[test]
fn test_schemeless_input_does_not_fail() {
    let n = NormalizedPath::parse("example.com/about");
    assert_eq!(n.host, "example.com");
    assert_eq!(n.segments, vec!["about"]);

    let bare = NormalizedPath::parse("not a url");
    assert!(bare.segments.is_empty());
    assert!(bare.is_homepage());
}

#[test]
fn test_homepage_detection() {
    assert!(NormalizedPath::parse("https://example.com").is_homepage());
    assert!(NormalizedPath::parse("https://example.com/").is_homepage());
    assert!(NormalizedPath::parse("https://example.com/index.html").is_homepage());
    assert!(!NormalizedPath::parse("https://example.com/about").is_homepage());
}

#[test]
fn test_locale_code_shape() {
    assert!(is_locale_code("fr"));
    assert!(is_locale_code("EN"));
    assert!(!is_locale_code("fra"));
    assert!(!is_locale_code("f1"));
    assert!(!is_locale_code(""));
}

#[test]
fn test_site_domain_fallbacks() {
    assert_eq!(site_domain(Some("https://www.Example.com/"), None), "example.com");
    assert_eq!(site_domain(None, Some("https://shop.example.com/a")), "shop.example.com");
    assert_eq!(site_domain(Some(""), None), "site");
    assert_eq!(site_domain(None, None), "site");
}
