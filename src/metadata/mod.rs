//! Page-level metadata: title, meta description and keywords, canonical
//! link, domain and tag links.

pub mod meta_tags;

use std::collections::HashSet;
use std::sync::LazyLock;

use dom_query::Document;
use url::Url;

use crate::dom;
use crate::text::{self, ReplaceSequence, StringSplitter};
use crate::url_utils;

pub use meta_tags::{parse_meta_date, MetaTagPublishDateExtractor};

/// Title delimiters, tried in order. Only the first one present is applied.
const TITLE_DELIMITERS: &[(&str, &str)] = &[("|", r"\|"), ("-", " - "), ("»", "»"), (":", ":")];

static TITLE_SPLITTERS: LazyLock<Vec<(&'static str, StringSplitter)>> = LazyLock::new(|| {
    TITLE_DELIMITERS
        .iter()
        .filter_map(|(marker, pattern)| StringSplitter::new(pattern).ok().map(|s| (*marker, s)))
        .collect()
});

static TITLE_REPLACEMENTS: LazyLock<Option<ReplaceSequence>> = LazyLock::new(|| {
    ReplaceSequence::create("&raquo;", "")
        .and_then(|seq| seq.append("»", ""))
        .ok()
});

/// Clean a raw `<title>` string.
///
/// Site names are dropped by splitting on the first delimiter present and
/// keeping the longest piece. The result is HTML-escaped.
///
/// ```rust
/// use rs_goose::metadata::clean_title;
///
/// assert_eq!(clean_title("Breaking News | Example Site"), "Breaking News");
/// ```
#[must_use]
pub fn clean_title(raw: &str) -> String {
    let mut title = raw.to_string();

    if let Some((_, splitter)) = TITLE_SPLITTERS.iter().find(|(marker, _)| raw.contains(marker)) {
        let mut longest = "";
        for piece in splitter.split(raw) {
            if piece.trim().chars().count() > longest.trim().chars().count() {
                longest = piece;
            }
        }
        title = longest.to_string();
    }

    if let Some(replacements) = TITLE_REPLACEMENTS.as_ref() {
        title = replacements.replace_all(&title);
    }

    text::escape_html(title.trim())
        .replace("&#65533;", "")
        .replace('\u{FFFD}', "")
}

/// Text of the first `<title>`, cleaned. Empty when there is none.
#[must_use]
pub fn extract_title(doc: &Document) -> String {
    dom::select_all(doc, "title")
        .first()
        .map(|title| clean_title(&dom::text(title)))
        .unwrap_or_default()
}

fn meta_content(doc: &Document, selector: &str) -> String {
    dom::select_all(doc, selector)
        .first()
        .map(|meta| dom::attr_or_empty(meta, "content").trim().to_string())
        .unwrap_or_default()
}

/// `<meta name="description">` content.
#[must_use]
pub fn extract_meta_description(doc: &Document) -> String {
    meta_content(doc, "meta[name=description]")
}

/// `<meta name="keywords">` content.
#[must_use]
pub fn extract_meta_keywords(doc: &Document) -> String {
    meta_content(doc, "meta[name=keywords]")
}

/// `<link rel="canonical">` resolved against the page URL, or the page URL
/// itself when the page declares none.
#[must_use]
pub fn extract_canonical_link(doc: &Document, page_url: &Url) -> String {
    let href = dom::select_all(doc, "link[rel=canonical]")
        .first()
        .map(|link| dom::attr_or_empty(link, "href").trim().to_string())
        .unwrap_or_default();

    if href.is_empty() {
        page_url.to_string()
    } else {
        url_utils::create_absolute_url(&href, page_url)
    }
}

/// Host of a URL, empty when it has none.
#[must_use]
pub fn extract_domain(canonical_link: &str) -> String {
    url_utils::get_domain_url(canonical_link)
}

/// Non-empty texts of tag links (`rel="tag"` or an `href` containing `/tag/`).
#[must_use]
pub fn extract_tags(doc: &Document) -> HashSet<String> {
    dom::select_all(doc, r#"a[rel=tag], a[href*="/tag/"]"#)
        .iter()
        .map(|link| dom::text(link).trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}
