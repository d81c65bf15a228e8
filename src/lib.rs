//! # rs-goose
//!
//! Article extraction for web pages.
//!
//! Given a page URL (and optionally its HTML), this library finds the element
//! holding the article body, strips navigation, ads and boilerplate around it,
//! and returns the readable text together with the title, metadata, tag links,
//! video embeds and a best guess at the lead image.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_goose::{extract_content, Configuration};
//!
//! let html = r#"<html><head><title>My Article | Site</title></head>
//! <body><div>
//! <p>This is the first paragraph and it has a lot of the words that we need.</p>
//! <p>This is the second paragraph and it is also one of the longer ones here.</p>
//! </div></body></html>"#;
//!
//! let config = Configuration {
//!     enable_image_fetching: false,
//!     ..Configuration::default()
//! };
//! if let Some(article) = extract_content(config, "https://example.com/a", Some(html), false)? {
//!     println!("Title: {}", article.title);
//!     println!("Content: {}", article.cleaned_article_text);
//! }
//! # Ok::<(), rs_goose::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Cleaning**: scripts, styles, boilerplate containers and social widgets
//!   are removed and text-only wrappers become paragraphs
//! - **Scoring**: paragraphs dense in stop words vote for their parent and
//!   grandparent; the best-scoring element is the top node
//! - **Cleanup**: prose in preceding siblings is pulled in, link lists and
//!   weak children are pruned
//! - **Lead image**: known containers, then the largest real image near the
//!   body, then `og:image`-style meta tags

mod error;
mod result;

/// Compiled regex constants.
pub mod patterns;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Stop words and regex string helpers.
pub mod text;

/// Link density testing for boilerplate detection.
pub mod link_density;

/// Document cleaning before scoring.
pub mod cleaner;

/// Extraction settings and pluggable extractors.
pub mod config;

/// Top node selection, cleanup and the extraction pipeline.
pub mod extractor;

/// Title, meta tags, canonical link, tags and publish dates.
pub mod metadata;

/// Article text output.
pub mod formatter;

/// Lead image selection.
pub mod images;

/// HTTP collaborator.
pub mod fetch;

/// Character encoding detection and transcoding.
pub mod encoding;

/// URL utilities for validation, resolution, and normalization.
pub mod url_utils;

// Public API - re-exports
pub use config::{AdditionalDataExtractor, Configuration, Extractor, HttpSettings, PublishDateExtractor};
pub use error::{Error, Result};
pub use extractor::ContentExtractor;
pub use metadata::MetaTagPublishDateExtractor;
pub use result::{Article, ArticleSummary, Image, ImageExtractionType};

/// Extract one article with a fresh HTTP-backed [`ContentExtractor`].
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] for a malformed URL and [`Error::Fetch`] when
/// the HTTP client cannot be built. Everything else degrades inside the
/// pipeline; see [`ContentExtractor::extract`].
pub fn extract_content(
    config: Configuration,
    url: &str,
    html: Option<&str>,
    for_viewer: bool,
) -> Result<Option<Article>> {
    ContentExtractor::new(config)?.extract(url, html, for_viewer)
}
