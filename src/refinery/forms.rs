// * Form & Iframe Detection
// * Finds <form> and <iframe> elements in a page and classifies them.
// * Parsing is synchronous; everything returned is owned so callers can hold it across awaits.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use url::Url;

use super::features::{ContentFeatures, ScrapeStatus};

// * Precompiled selectors
static SELECTOR_FORM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("form").expect("Invalid form selector"));
static SELECTOR_IFRAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("iframe").expect("Invalid iframe selector"));
static SELECTOR_FIELD: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("input, textarea, select").expect("Invalid field selector")
});
static SELECTOR_BUTTON: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"button, input[type="submit"]"#).expect("Invalid button selector")
});

// * Keyword patterns matched against a form's lowercased attribute/label signature
static SEARCH_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(search|query|buscar|find)\b").unwrap());
static LOGIN_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(log ?in|sign ?in|sign ?up|register|registration|create account|password)\b")
        .unwrap()
});
static NEWSLETTER_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(newsletter|subscribe|subscription|mailing list)\b").unwrap());
static CONTACT_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(contact|message|enquiry|inquiry|quote|demo|phone|company|comments?)\b").unwrap()
});

// * Iframe host patterns, checked in this order
static RECAPTCHA_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(recaptcha|hcaptcha\.com|challenges\.cloudflare\.com)").unwrap());
static VIDEO_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(youtube\.com|youtube-nocookie\.com|youtu\.be|vimeo\.com|wistia\.(com|net)|brightcove|dailymotion\.com|vidyard\.com)")
        .unwrap()
});
static MAPS_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(google\.[a-z.]+/maps|maps\.google\.|openstreetmap\.org|bing\.com/maps|mapbox\.com)")
        .unwrap()
});
static SOCIAL_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(facebook\.com|twitter\.com|//x\.com|instagram\.com|linkedin\.com|tiktok\.com|pinterest\.com)")
        .unwrap()
});

/// Form purpose, decided from attributes, field names and submit text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormKind {
    Search,
    LoginRegistration,
    Newsletter,
    ContactLead,
    Other,
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormKind::Search => write!(f, "Search"),
            FormKind::LoginRegistration => write!(f, "Login/Registration"),
            FormKind::Newsletter => write!(f, "Newsletter"),
            FormKind::ContactLead => write!(f, "Contact/Lead"),
            FormKind::Other => write!(f, "Other"),
        }
    }
}

/// Iframe origin category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IframeSource {
    Video,
    Maps,
    SocialMedia,
    Recaptcha,
    ExternalContent,
    InternalContent,
    NoSource,
}

impl fmt::Display for IframeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IframeSource::Video => write!(f, "Video"),
            IframeSource::Maps => write!(f, "Maps"),
            IframeSource::SocialMedia => write!(f, "Social Media"),
            IframeSource::Recaptcha => write!(f, "reCAPTCHA"),
            IframeSource::ExternalContent => write!(f, "External Content"),
            IframeSource::InternalContent => write!(f, "Internal Content"),
            IframeSource::NoSource => write!(f, "No Source"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInfo {
    pub kind: FormKind,
    pub action: Option<String>,
    pub method: String,
    pub field_count: usize,
}

impl FormInfo {
    fn describe(&self, index: usize) -> String {
        format!(
            "Form {}: {} (action: {}, method: {}, fields: {})",
            index,
            self.kind,
            self.action.as_deref().unwrap_or("none"),
            self.method,
            self.field_count
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IframeInfo {
    /// Absolute `src`, resolved against the page URL
    pub src: Option<String>,
    /// Inline document from `srcdoc`
    pub srcdoc: Option<String>,
    pub source: IframeSource,
}

impl IframeInfo {
    /// True when the iframe's document can be inspected for forms
    pub fn is_fetchable(&self) -> bool {
        self.src
            .as_deref()
            .map(|s| s.starts_with("http://") || s.starts_with("https://"))
            .unwrap_or(false)
    }
}

/// Everything found on one page before iframe documents are inspected
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageScan {
    pub forms: Vec<FormInfo>,
    pub iframes: Vec<IframeInfo>,
}

// * Parses a page and collects its forms and iframes
pub fn scan_html(html: &str, page_url: &str) -> PageScan {
    let document = Html::parse_document(html);
    let base = Url::parse(page_url).ok();

    let forms = document.select(&SELECTOR_FORM).map(|f| inspect_form(&f)).collect();
    let iframes = document
        .select(&SELECTOR_IFRAME)
        .map(|el| inspect_iframe(&el, base.as_ref()))
        .collect();

    PageScan { forms, iframes }
}

// * Forms only; used for iframe documents
pub fn detect_forms(html: &str) -> Vec<FormInfo> {
    let document = Html::parse_document(html);
    document.select(&SELECTOR_FORM).map(|f| inspect_form(&f)).collect()
}

fn inspect_form(form: &ElementRef) -> FormInfo {
    let el = form.value();
    let mut signature = String::new();
    for attr in ["id", "class", "name", "action", "role", "aria-label"] {
        if let Some(v) = el.attr(attr) {
            signature.push_str(v);
            signature.push(' ');
        }
    }

    let mut field_count = 0;
    let mut has_password = false;
    let mut has_search_input = false;
    let mut has_email = false;
    let mut has_textarea = false;
    let mut visible_fields = 0;

    for field in form.select(&SELECTOR_FIELD) {
        let f = field.value();
        let input_type = f.attr("type").unwrap_or("text").to_ascii_lowercase();
        if matches!(input_type.as_str(), "submit" | "button" | "reset" | "image") {
            continue;
        }
        field_count += 1;
        if input_type != "hidden" {
            visible_fields += 1;
        }
        match (f.name(), input_type.as_str()) {
            ("textarea", _) => has_textarea = true,
            (_, "password") => has_password = true,
            (_, "search") => has_search_input = true,
            (_, "email") => has_email = true,
            _ => {}
        }
        for attr in ["name", "id", "placeholder", "aria-label"] {
            if let Some(v) = f.attr(attr) {
                signature.push_str(v);
                signature.push(' ');
            }
        }
        if matches!(f.attr("name"), Some("q") | Some("s")) {
            has_search_input = true;
        }
    }

    for button in form.select(&SELECTOR_BUTTON) {
        signature.extend(button.text());
        if let Some(v) = button.value().attr("value") {
            signature.push_str(v);
        }
        signature.push(' ');
    }

    let signature = signature.to_lowercase().replace(['_', '-'], " ");
    let is_search = has_search_input || el.attr("role") == Some("search");

    let kind = if has_password || LOGIN_KEYWORDS.is_match(&signature) {
        FormKind::LoginRegistration
    } else if is_search || (visible_fields <= 2 && SEARCH_KEYWORDS.is_match(&signature)) {
        FormKind::Search
    } else if NEWSLETTER_KEYWORDS.is_match(&signature) || (has_email && visible_fields <= 2) {
        FormKind::Newsletter
    } else if has_textarea || CONTACT_KEYWORDS.is_match(&signature) || (has_email && visible_fields >= 3) {
        FormKind::ContactLead
    } else {
        FormKind::Other
    };

    FormInfo {
        kind,
        action: el.attr("action").map(str::trim).filter(|a| !a.is_empty()).map(str::to_string),
        method: el.attr("method").unwrap_or("get").to_uppercase(),
        field_count,
    }
}

fn inspect_iframe(iframe: &ElementRef, base: Option<&Url>) -> IframeInfo {
    let el = iframe.value();
    let raw_src = el.attr("src").or_else(|| el.attr("data-src")).map(str::trim).filter(|s| !s.is_empty());
    let srcdoc = el.attr("srcdoc").filter(|s| !s.trim().is_empty()).map(str::to_string);

    let src = raw_src.map(|raw| match base {
        Some(base) => base.join(raw).map(|u| u.to_string()).unwrap_or_else(|_| raw.to_string()),
        None => raw.to_string(),
    });

    let source = classify_iframe_source(src.as_deref(), base);
    IframeInfo { src, srcdoc, source }
}

// * Categorises an (absolute) iframe src relative to the page it sits on
pub fn classify_iframe_source(src: Option<&str>, page: Option<&Url>) -> IframeSource {
    let Some(src) = src else {
        return IframeSource::NoSource;
    };
    if src.starts_with("about:") || src.starts_with("javascript:") {
        return IframeSource::NoSource;
    }

    if RECAPTCHA_SRC.is_match(src) {
        IframeSource::Recaptcha
    } else if VIDEO_SRC.is_match(src) {
        IframeSource::Video
    } else if MAPS_SRC.is_match(src) {
        IframeSource::Maps
    } else if SOCIAL_SRC.is_match(src) {
        IframeSource::SocialMedia
    } else {
        let src_host = Url::parse(src).ok().and_then(|u| u.host_str().map(bare_host));
        let page_host = page.and_then(|u| u.host_str().map(bare_host));
        match (src_host, page_host) {
            (Some(a), Some(b)) if a == b => IframeSource::InternalContent,
            (None, _) => IframeSource::InternalContent,
            _ => IframeSource::ExternalContent,
        }
    }
}

fn bare_host(host: &str) -> String {
    let host = host.to_lowercase();
    host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
}

/// Builds the feature record for a successfully fetched page.
///
/// `iframe_forms[i]` holds the forms found inside `scan.iframes[i]`.
pub fn build_features(scan: &PageScan, iframe_forms: &[Vec<FormInfo>]) -> ContentFeatures {
    let form_types = distinct(scan.forms.iter().map(|f| f.kind.to_string()));
    let form_details = scan
        .forms
        .iter()
        .enumerate()
        .map(|(i, f)| f.describe(i + 1))
        .collect::<Vec<_>>()
        .join("; ");

    let iframe_sources = distinct(scan.iframes.iter().map(|i| i.source.to_string()));
    let iframe_details = scan
        .iframes
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            format!(
                "Iframe {}: {} ({})",
                i + 1,
                frame.source,
                frame.src.as_deref().unwrap_or(if frame.srcdoc.is_some() { "srcdoc" } else { "no src" })
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    let mut iframe_forms_count = 0;
    let mut iframe_with_forms_count = 0;
    let mut iframe_forms_details = Vec::new();
    for (i, (frame, forms)) in scan.iframes.iter().zip(iframe_forms).enumerate() {
        if forms.is_empty() {
            continue;
        }
        iframe_with_forms_count += 1;
        iframe_forms_count += forms.len();
        iframe_forms_details.push(format!(
            "Iframe {} ({}): {} form(s) [{}]",
            i + 1,
            frame.source,
            forms.len(),
            distinct(forms.iter().map(|f| f.kind.to_string()))
        ));
    }

    let scrape_status = if scan.forms.is_empty() && scan.iframes.is_empty() {
        ScrapeStatus::NoFormsOrIframes
    } else {
        ScrapeStatus::Success
    };

    ContentFeatures {
        has_forms: !scan.forms.is_empty(),
        form_count: scan.forms.len(),
        form_types,
        form_details,
        has_iframes: iframe_with_forms_count > 0,
        iframe_count: iframe_with_forms_count,
        iframe_sources,
        iframe_details,
        iframe_forms_count,
        iframe_with_forms_count,
        iframe_forms_details: iframe_forms_details.join("; "),
        scrape_status,
    }
}

// * Comma-joins distinct values in first-seen order
fn distinct(values: impl Iterator<Item = String>) -> String {
    let mut seen: Vec<String> = Vec::new();
    for v in values {
        if !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://www.example.com/contact";

    #[test]
    fn test_search_form() {
        let html = r#"<form action="/search" role="search"><input type="text" name="q"><button>Go</button></form>"#;
        let forms = detect_forms(html);
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].kind, FormKind::Search);
        assert_eq!(forms[0].action.as_deref(), Some("/search"));
        assert_eq!(forms[0].method, "GET");
    }

    #[test]
    fn test_login_form() {
        let html = r#"<form method="post"><input type="email" name="user"><input type="password" name="pw"><input type="submit" value="Sign in"></form>"#;
        let forms = detect_forms(html);
        assert_eq!(forms[0].kind, FormKind::LoginRegistration);
        assert_eq!(forms[0].method, "POST");
        assert_eq!(forms[0].field_count, 2);
    }

    #[test]
    fn test_newsletter_form() {
        let html = r#"<form class="newsletter-form"><input type="email" name="email"><button>Subscribe</button></form>"#;
        assert_eq!(detect_forms(html)[0].kind, FormKind::Newsletter);
    }

    #[test]
    fn test_contact_form() {
        let html = r#"<form action="/send"><input name="first_name"><input type="email" name="email"><textarea name="msg"></textarea><button>Send</button></form>"#;
        assert_eq!(detect_forms(html)[0].kind, FormKind::ContactLead);
    }

    #[test]
    fn test_other_form() {
        let html = r#"<form><select name="country"><option>US</option></select><button>Apply</button></form>"#;
        assert_eq!(detect_forms(html)[0].kind, FormKind::Other);
    }

    #[test]
    fn test_iframe_sources() {
        let base = Url::parse(PAGE).unwrap();
        let classify = |s: &str| classify_iframe_source(Some(s), Some(&base));

        assert_eq!(classify("https://www.youtube.com/embed/abc"), IframeSource::Video);
        assert_eq!(classify("https://www.google.com/maps/embed?pb=1"), IframeSource::Maps);
        assert_eq!(classify("https://www.google.com/recaptcha/api2/anchor"), IframeSource::Recaptcha);
        assert_eq!(classify("https://www.facebook.com/plugins/page.php"), IframeSource::SocialMedia);
        assert_eq!(classify("https://example.com/widget"), IframeSource::InternalContent);
        assert_eq!(classify("https://forms.hubspot.com/embed"), IframeSource::ExternalContent);
        assert_eq!(classify_iframe_source(None, Some(&base)), IframeSource::NoSource);
        assert_eq!(classify("about:blank"), IframeSource::NoSource);
    }

    #[test]
    fn test_scan_resolves_relative_iframe_src() {
        let html = r#"<iframe src="/embed/form"></iframe><iframe></iframe>"#;
        let scan = scan_html(html, PAGE);
        assert_eq!(scan.iframes.len(), 2);
        assert_eq!(scan.iframes[0].src.as_deref(), Some("https://www.example.com/embed/form"));
        assert_eq!(scan.iframes[0].source, IframeSource::InternalContent);
        assert!(scan.iframes[0].is_fetchable());
        assert_eq!(scan.iframes[1].source, IframeSource::NoSource);
        assert!(!scan.iframes[1].is_fetchable());
    }

    #[test]
    fn test_features_only_count_iframes_with_forms() {
        let html = r#"
            <form role="search"><input name="q"></form>
            <iframe src="https://www.youtube.com/embed/x"></iframe>
            <iframe src="https://forms.example.net/lead"></iframe>
        "#;
        let scan = scan_html(html, PAGE);
        let iframe_forms = vec![Vec::new(), detect_forms(r#"<form><textarea name="message"></textarea></form>"#)];
        let features = build_features(&scan, &iframe_forms);

        assert!(features.has_forms);
        assert_eq!(features.form_count, 1);
        assert_eq!(features.form_types, "Search");
        assert!(features.has_iframes);
        assert_eq!(features.iframe_count, 1);
        assert_eq!(features.iframe_with_forms_count, 1);
        assert_eq!(features.iframe_forms_count, 1);
        assert_eq!(features.iframe_sources, "Video, External Content");
        assert!(features.iframe_forms_details.starts_with("Iframe 2 (External Content): 1 form(s)"));
        assert_eq!(features.scrape_status, ScrapeStatus::Success);
    }

    #[test]
    fn test_empty_page_status() {
        let scan = scan_html("<html><body><p>hi</p></body></html>", PAGE);
        let features = build_features(&scan, &[]);
        assert_eq!(features.scrape_status, ScrapeStatus::NoFormsOrIframes);
        assert!(!features.has_forms && !features.has_iframes);
    }
}
