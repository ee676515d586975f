use url::Url;

use crate::config::constants::FALLBACK_DOMAIN;

// * Splits a URL into a comparable host and path segments.
// *
// * Logic:
// * 1. Remove a leading `https://` or `http://`.
// * 2. Remove a leading `www.`.
// * 3. Split on the first `/` into host and rest.
// * 4. Strip leading/trailing `/` from the rest and split it on `/`.
// *
// * Malformed or schemeless input never fails: a URL without any `/` after the
// * host simply has no segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPath {
    pub host: String,
    pub path: String,
    pub segments: Vec<String>,
}

impl NormalizedPath {
    pub fn parse(url: &str) -> Self {
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(url);
        let rest = rest.strip_prefix("www.").unwrap_or(rest);

        let (host, raw_path) = match rest.split_once('/') {
            Some((host, path)) => (host, path),
            None => (rest, ""),
        };

        let path = raw_path.trim_matches('/');
        let segments = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').map(str::to_string).collect()
        };

        Self {
            host: host.to_string(),
            path: path.to_string(),
            segments,
        }
    }

    pub fn first_segment(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    // * The homepage is the URL whose path is empty, `/` or `index.html`
    pub fn is_homepage(&self) -> bool {
        self.path.is_empty() || self.path == "index.html"
    }
}

// * Convenience wrapper returning only the segments
pub fn path_segments(url: &str) -> Vec<String> {
    NormalizedPath::parse(url).segments
}

// * True when `s` is exactly two alphabetic characters (a probable locale code)
pub fn is_locale_code(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(a), Some(b), None) if a.is_alphabetic() && b.is_alphabetic()
    )
}

// * Derives the site domain used in output filenames.
// * Prefers the inventory origin, then the first URL, then a fixed fallback.
pub fn site_domain(origin: Option<&str>, first_url: Option<&str>) -> String {
    origin
        .and_then(host_without_www)
        .or_else(|| first_url.and_then(host_without_www))
        .unwrap_or_else(|| FALLBACK_DOMAIN.to_string())
}

fn host_without_www(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    // * Schemeless origins ("example.com") still go through the permissive splitter
    let host = match Url::parse(raw) {
        Ok(parsed) => parsed.host_str().map(str::to_lowercase),
        Err(_) => Some(NormalizedPath::parse(raw).host.to_lowercase()),
    }?;

    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}
