// * Locale Detector
// * Finds a 2-letter language code in the URL path, defaulting to the base locale.

use super::normalization::{is_locale_code, NormalizedPath};
use crate::config::constants::DEFAULT_LOCALE;

// * Rules, in priority order:
// * 1. The whole path is a 2-letter code ("/vi").
// * 2. The first segment is a 2-letter code ("/es/about").
// * 3. The only segment is exactly "{code}.html" ("/ko.html").
// * 4. Otherwise the default locale.
// *
// * Any alphabetic pair is accepted; there is no whitelist.
pub fn extract_locale(url: &str) -> String {
    locale_of(&NormalizedPath::parse(url))
}

pub fn locale_of(normalized: &NormalizedPath) -> String {
    if is_locale_code(&normalized.path) {
        return normalized.path.to_lowercase();
    }

    let Some(first) = normalized.first_segment() else {
        return DEFAULT_LOCALE.to_string();
    };

    if is_locale_code(first) {
        return first.to_lowercase();
    }

    if normalized.segments.len() == 1 {
        if let Some((code, _)) = first.split_once('.') {
            if is_locale_code(code) && first == format!("{}.html", code) {
                return code.to_lowercase();
            }
        }
    }

    DEFAULT_LOCALE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_segment() {
        assert_eq!(extract_locale("https://example.com/es/about"), "es");
        assert_eq!(extract_locale("https://example.com/KO/news/1"), "ko");
    }

    #[test]
    fn test_bare_locale_path() {
        assert_eq!(extract_locale("https://example.com/vi"), "vi");
        assert_eq!(extract_locale("https://example.com/vi/"), "vi");
    }

    #[test]
    fn test_locale_html_page() {
        assert_eq!(extract_locale("https://example.com/ko.html"), "ko");
        // * Only "{code}.html" counts, and only as the sole segment
        assert_eq!(extract_locale("https://example.com/ko.htm"), "en");
        assert_eq!(extract_locale("https://example.com/ko.html/more"), "en");
    }

    #[test]
    fn test_default_locale() {
        assert_eq!(extract_locale("https://example.com/about"), "en");
        assert_eq!(extract_locale("https://example.com/"), "en");
        assert_eq!(extract_locale("https://example.com"), "en");
        assert_eq!(extract_locale("garbage"), "en");
    }

    #[test]
    fn test_not_restricted_to_known_locales() {
        assert_eq!(extract_locale("https://example.com/zz/page"), "zz");
    }

    #[test]
    fn test_digits_are_not_locales() {
        assert_eq!(extract_locale("https://example.com/v2/api"), "en");
    }
}
