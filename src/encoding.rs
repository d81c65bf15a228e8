//! Character encoding detection and transcoding of fetched pages.
//!
//! The charset is taken, in order, from a byte-order mark, the HTTP
//! `Content-Type` header, a `<meta charset>` / `http-equiv` declaration in the
//! first 1024 bytes, and finally defaults to UTF-8.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// `<meta charset="...">`
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// `charset=...` parameter of a Content-Type value.
static CHARSET_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex"));

/// Charset label declared in a `Content-Type` header value.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    let label = CHARSET_PARAM_RE.captures(content_type)?.get(1)?.as_str();
    Encoding::for_label(label.as_bytes())
}

/// Charset declared by the document itself. Only the first 1024 bytes are examined.
#[must_use]
pub fn charset_from_meta(html: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&html[..html.len().min(1024)]);
    let label = CHARSET_META_RE.captures(&head)?.get(1)?.as_str().to_string();
    Encoding::for_label(label.as_bytes())
}

/// Pick the encoding for a response body.
#[must_use]
pub fn detect_encoding(html: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }
    content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_meta(html))
        .unwrap_or(UTF_8)
}

/// Decode a response body to UTF-8, replacing undecodable bytes with U+FFFD.
///
/// ```
/// use rs_goose::encoding::transcode_to_utf8;
///
/// let body = b"<html><body>Caf\xE9</body></html>";
/// let text = transcode_to_utf8(body, Some("text/html; charset=ISO-8859-1"));
/// assert!(text.contains("Café"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(html, content_type);
    let (decoded, _encoding_used, _had_errors) = encoding.decode(html);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_charset_wins_over_meta() {
        let html = br#"<html><head><meta charset="utf-8"></head><body>Test</body></html>"#;
        let encoding = detect_encoding(html, Some("text/html; charset=windows-1252"));

        assert_eq!(encoding.name(), "windows-1252");
    }

    #[test]
    fn meta_charset_used_without_header() {
        let html = br#"<html><head><meta charset="ISO-8859-1"></head><body>Test</body></html>"#;

        // ISO-8859-1 is windows-1252 per WHATWG
        assert_eq!(detect_encoding(html, Some("text/html")).name(), "windows-1252");
    }

    #[test]
    fn http_equiv_declaration() {
        let html = br#"<META HTTP-EQUIV="content-type" CONTENT="text/html; CHARSET=ISO-8859-1">"#;
        assert_eq!(detect_encoding(html, None).name(), "windows-1252");
    }

    #[test]
    fn bom_wins_over_everything() {
        let html = b"\xEF\xBB\xBF<html><body>x</body></html>";
        assert_eq!(detect_encoding(html, Some("text/html; charset=windows-1252")), UTF_8);
    }

    #[test]
    fn default_to_utf8() {
        assert_eq!(detect_encoding(b"<html><body>Test</body></html>", None), UTF_8);
    }

    #[test]
    fn transcode_windows1252_quotes() {
        let html = b"<html><head><meta charset=\"windows-1252\"></head><body>\x93Hello\x94</body></html>";
        let result = transcode_to_utf8(html, None);

        assert!(result.contains("\u{201C}Hello\u{201D}"));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let result = transcode_to_utf8(b"<p>Test \xFF\xFE Invalid</p>", None);

        assert!(result.contains("Test"));
        assert!(result.contains('\u{FFFD}'));
    }

    #[test]
    fn unknown_label_falls_through() {
        assert!(charset_from_content_type("text/html; charset=made-up").is_none());
        assert!(charset_from_content_type("text/html").is_none());
    }
}
