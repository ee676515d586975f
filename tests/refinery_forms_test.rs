use site_scope::refinery::{build_features, detect_forms, scan_html, FormKind, IframeSource, ScrapeStatus};

// * Test Suite for Form and Iframe Detection

const PAGE: &str = r#"
<html><body>
  <form role="search" action="/search"><input type="text" name="q"><button>Go</button></form>
  <form id="contact" action="/contact" method="post">
    <input name="name"><input type="email" name="email"><textarea name="message"></textarea>
    <input type="submit" value="Send">
  </form>
  <iframe src="https://www.youtube.com/embed/abc"></iframe>
  <iframe src="/embedded/signup"></iframe>
  <iframe srcdoc="<form><input type='password' name='pw'></form>"></iframe>
</body></html>
"#;

#[test]
fn test_page_forms_classified() {
    let scan = scan_html(PAGE, "https://example.com/landing");
    let kinds: Vec<FormKind> = scan.forms.iter().map(|f| f.kind.clone()).collect();
    assert_eq!(kinds, vec![FormKind::Search, FormKind::ContactLead]);
    assert_eq!(scan.forms[1].method, "POST");
}

#[test]
fn test_iframe_sources() {
    let scan = scan_html(PAGE, "https://example.com/landing");
    let sources: Vec<IframeSource> = scan.iframes.iter().map(|i| i.source.clone()).collect();
    assert_eq!(
        sources,
        vec![IframeSource::Video, IframeSource::InternalContent, IframeSource::NoSource]
    );
    assert_eq!(scan.iframes[1].src.as_deref(), Some("https://example.com/embedded/signup"));
}

#[test]
fn test_only_iframes_with_forms_count() {
    let scan = scan_html(PAGE, "https://example.com/landing");
    let inner = detect_forms(scan.iframes[2].srcdoc.as_deref().unwrap());
    let iframe_forms = vec![Vec::new(), Vec::new(), inner];

    let f = build_features(&scan, &iframe_forms);
    assert!(f.has_forms);
    assert_eq!(f.form_count, 2);
    assert_eq!(f.form_types, "Search, Contact/Lead");
    assert!(f.has_iframes);
    assert_eq!(f.iframe_count, 1);
    assert_eq!(f.iframe_with_forms_count, 1);
    assert_eq!(f.iframe_forms_count, 1);
    assert!(f.iframe_sources.contains("Video"));
    assert_eq!(f.scrape_status, ScrapeStatus::Success);
}

#[test]
fn test_empty_page_status() {
    let scan = scan_html("<html><body><p>hi</p></body></html>", "https://example.com/");
    let f = build_features(&scan, &[]);
    assert_eq!(f.scrape_status.to_string(), "No forms or iframes found");
    assert!(!f.has_forms && !f.has_iframes);
}
