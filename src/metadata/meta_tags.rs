//! Publish dates from `<meta>` tags.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use dom_query::Document;

use crate::config::Extractor;
use crate::dom;

/// Meta `name`/`property`/`itemprop` values that carry a publish date, in
/// priority order.
const DATE_KEYS: &[&str] = &[
    "article:published_time",
    "og:article:published_time",
    "article:published",
    "article.published",
    "article:created",
    "article.created",
    "datepublished",
    "dc.date.issued",
    "dc.date",
    "dcterms.created",
    "dcterms.date",
    "date",
    "pubdate",
    "publish_date",
    "publishdate",
    "sailthru.date",
    "parsely-pub-date",
    "timestamp",
    "pdate",
];

/// Parse a date string from a meta tag.
///
/// Supports RFC 3339 and common date-only formats; date-only values are
/// midnight UTC.
#[must_use]
pub fn parse_meta_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    // ISO 8601 without timezone
    if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }

    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%d/%m/%Y",
        "%m/%d/%Y",
        "%B %d, %Y", // January 15, 2024
        "%b %d, %Y", // Jan 15, 2024
        "%d %B %Y",  // 15 January 2024
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_str, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Reads the publish date from `article:published_time`-style meta tags.
///
/// Plug it into [`crate::Configuration::publish_date_extractor`]:
///
/// ```rust
/// use std::sync::Arc;
/// use rs_goose::{Configuration, MetaTagPublishDateExtractor};
///
/// let config = Configuration {
///     publish_date_extractor: Arc::new(MetaTagPublishDateExtractor),
///     ..Configuration::default()
/// };
/// # let _ = config;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaTagPublishDateExtractor;

impl Extractor<Option<DateTime<Utc>>> for MetaTagPublishDateExtractor {
    fn extract(&self, document: &Document) -> Option<DateTime<Utc>> {
        let metas = dom::select_all(document, "meta[content]");
        let mut candidates: Vec<(usize, String)> = metas
            .iter()
            .filter_map(|meta| {
                let key = dom::attr(meta, "property")
                    .or_else(|| dom::attr(meta, "name"))
                    .or_else(|| dom::attr(meta, "itemprop"))?
                    .to_lowercase();
                let rank = DATE_KEYS.iter().position(|k| *k == key)?;
                Some((rank, dom::attr_or_empty(meta, "content")))
            })
            .collect();
        candidates.sort_by_key(|(rank, _)| *rank);

        candidates
            .iter()
            .find_map(|(_, content)| parse_meta_date(content))
    }
}
