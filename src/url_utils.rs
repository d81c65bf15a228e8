//! URL Utility Functions
//!
//! Validation, `#!` rewriting, resolution of relative links and image paths,
//! host extraction and the link hash that keys temporary files.

use sha2::{Digest, Sha256};
use url::Url;

use crate::error::{Error, Result};

/// Parse `s` if it is an absolute http(s) URL with a host.
#[must_use]
pub fn is_absolute_url(s: &str) -> Option<Url> {
    let s = s.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return None;
    }

    Url::parse(s).ok().filter(|url| url.host().is_some())
}

/// Rewrite an AJAX-crawlable `#!` URL to its `?_escaped_fragment_=` form.
///
/// ```
/// use rs_goose::url_utils::rewrite_escaped_fragment;
///
/// assert_eq!(
///     rewrite_escaped_fragment("https://site.com/#!/page"),
///     "https://site.com/?_escaped_fragment_=/page"
/// );
/// ```
#[must_use]
pub fn rewrite_escaped_fragment(url: &str) -> String {
    if url.contains("#!") {
        url.replace("#!", "?_escaped_fragment_=")
    } else {
        url.to_string()
    }
}

/// Rewrite `#!` fragments and check that the result is an absolute http(s) URL.
pub fn normalize_page_url(url: &str) -> Result<Url> {
    let rewritten = rewrite_escaped_fragment(url.trim());
    is_absolute_url(&rewritten).ok_or_else(|| Error::InvalidUrl(url.to_string()))
}

/// Convert a relative or absolute URL to absolute form.
///
/// Returns the input unchanged when it is already absolute, uses a
/// non-resolvable scheme, or cannot be joined with `base`.
#[must_use]
pub fn create_absolute_url(url_str: &str, base: &Url) -> String {
    let url_str = url_str.trim();

    if url_str.is_empty() {
        return String::new();
    }

    if url_str.starts_with("data:")
        || url_str.starts_with("javascript:")
        || url_str.starts_with("mailto:")
        || url_str.starts_with("tel:")
    {
        return url_str.to_string();
    }

    if is_absolute_url(url_str).is_some() {
        return url_str.to_string();
    }

    match base.join(url_str) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => url_str.to_string(),
    }
}

/// Absolute URL of an image `src`, with spaces escaped as `%20`.
#[must_use]
pub fn build_image_path(page_url: &Url, src: &str) -> String {
    let escaped = src.trim().replace(' ', "%20");
    create_absolute_url(&escaped, page_url)
}

/// Hostname of an absolute URL, or an empty string.
#[must_use]
pub fn get_domain_url(url_str: &str) -> String {
    is_absolute_url(url_str)
        .and_then(|url| url.host_str().map(ToString::to_string))
        .unwrap_or_default()
}

/// Hex SHA-256 of a URL.
#[must_use]
pub fn url_hash(url: &str) -> String {
    hex::encode(Sha256::digest(url.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/news/story.html").unwrap()
    }

    #[test]
    fn test_is_absolute_url() {
        assert!(is_absolute_url("https://example.com/a").is_some());
        assert!(is_absolute_url("  http://example.com  ").is_some());
        assert!(is_absolute_url("/relative/path").is_none());
        assert!(is_absolute_url("ftp://example.com/file").is_none());
        assert!(is_absolute_url("").is_none());
    }

    #[test]
    fn test_fragment_rewrite() {
        assert_eq!(
            rewrite_escaped_fragment("https://site.com/#!/page"),
            "https://site.com/?_escaped_fragment_=/page"
        );
        assert_eq!(rewrite_escaped_fragment("https://site.com/#top"), "https://site.com/#top");
    }

    #[test]
    fn test_normalize_page_url() {
        let url = normalize_page_url("https://site.com/#!/page").unwrap();
        assert_eq!(url.query(), Some("_escaped_fragment_=/page"));

        assert!(matches!(normalize_page_url("not a url"), Err(Error::InvalidUrl(_))));
        assert!(matches!(normalize_page_url("/just/a/path"), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_create_absolute_url() {
        assert_eq!(create_absolute_url("/img/a.jpg", &base()), "https://example.com/img/a.jpg");
        assert_eq!(create_absolute_url("b.jpg", &base()), "https://example.com/news/b.jpg");
        assert_eq!(
            create_absolute_url("https://cdn.example.net/c.jpg", &base()),
            "https://cdn.example.net/c.jpg"
        );
        assert_eq!(create_absolute_url("data:image/png;base64,AAAA", &base()), "data:image/png;base64,AAAA");
        assert_eq!(create_absolute_url("   ", &base()), "");
    }

    #[test]
    fn test_build_image_path_escapes_spaces() {
        assert_eq!(
            build_image_path(&base(), "/images/lead photo.jpg"),
            "https://example.com/images/lead%20photo.jpg"
        );
    }

    #[test]
    fn test_get_domain_url() {
        assert_eq!(get_domain_url("https://www.example.com/path"), "www.example.com");
        assert_eq!(get_domain_url("relative"), "");
    }

    #[test]
    fn test_url_hash_is_stable_hex() {
        let hash = url_hash("https://example.com/");

        assert_eq!(hash.len(), 64);
        assert_eq!(hash, url_hash("https://example.com/"));
        assert_ne!(hash, url_hash("https://example.com/other"));
    }
}
