//! Article extraction pipeline.
//!
//! [`ContentExtractor`] runs the stages in order: metadata on the raw
//! document, cleaning, top-node scoring, then (only when a top node exists)
//! video embeds, lead image, sibling cleanup and formatting.
//!
//! # Module Structure
//!
//! - `scoring`: picks the top node and keeps the per-node score table
//! - `cleanup`: sibling rehabilitation and pruning of the top node
//! - `videos`: video embeds around the top node

pub mod cleanup;
pub mod scoring;
pub mod videos;

use std::sync::Arc;

use dom_query::{Document, NodeRef};
use tracing::{debug, warn};
use url::Url;

use crate::cleaner::{DefaultDocumentCleaner, DocumentCleaner};
use crate::config::Configuration;
use crate::dom;
use crate::error::{Error, Result};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::formatter::{DefaultOutputFormatter, OutputFormatter};
use crate::images::{BestImageGuesser, ImageExtractor, TempImageGuard};
use crate::metadata;
use crate::result::Article;
use crate::url_utils;

pub use scoring::{ContentScorer, NodeScore, NodeScores, TopNodeSelection};

/// Extracts articles from web pages.
///
/// One extractor can serve many extractions; each call owns its document.
///
/// ```rust
/// use rs_goose::{Configuration, ContentExtractor};
///
/// let config = Configuration {
///     enable_image_fetching: false,
///     ..Configuration::default()
/// };
/// let extractor = ContentExtractor::new(config)?;
///
/// let html = "<html><head><title>Night owls of the valley | Nature</title></head><body><div>\
///     <p>Owls are birds that hunt at night and they can turn their heads a long way.</p>\
///     <p>Most of the owls in the area have been seen near the old farm in the spring.</p>\
///     </div></body></html>";
/// let article = extractor
///     .extract("https://example.com/owls", Some(html), false)?
///     .expect("page was supplied");
///
/// assert_eq!(article.title, "Night owls of the valley");
/// assert!(article.cleaned_article_text.contains("hunt at night"));
/// # Ok::<(), rs_goose::Error>(())
/// ```
pub struct ContentExtractor {
    config: Configuration,
    fetcher: Arc<dyn Fetcher>,
    cleaner: Box<dyn DocumentCleaner>,
    formatter: Box<dyn OutputFormatter>,
}

impl ContentExtractor {
    /// Extractor that fetches over HTTP with `config.http`.
    pub fn new(config: Configuration) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.http)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Extractor over a caller-supplied fetcher.
    #[must_use]
    pub fn with_fetcher(config: Configuration, fetcher: Arc<dyn Fetcher>) -> Self {
        let formatter = DefaultOutputFormatter::new(Arc::clone(&config.stop_words));
        Self {
            config,
            fetcher,
            cleaner: Box::new(DefaultDocumentCleaner),
            formatter: Box::new(formatter),
        }
    }

    /// Replace the document cleaner.
    #[must_use]
    pub fn cleaner(mut self, cleaner: impl DocumentCleaner + 'static) -> Self {
        self.cleaner = Box::new(cleaner);
        self
    }

    /// Replace the output formatter.
    #[must_use]
    pub fn formatter(mut self, formatter: impl OutputFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Extract the article at `url`.
    ///
    /// `html` is fetched when not supplied. With `for_viewer` only empty and
    /// negative-scored elements are pruned from the top node, so its links and
    /// inline formatting survive for rendering.
    ///
    /// # Errors
    ///
    /// Only [`Error::InvalidUrl`]. A page that cannot be fetched yields
    /// `Ok(None)`; a failure in a later stage yields the article built so far.
    #[tracing::instrument(skip(self, html))]
    pub fn extract(&self, url: &str, html: Option<&str>, for_viewer: bool) -> Result<Option<Article>> {
        let page_url = url_utils::normalize_page_url(url)?;
        let final_url = page_url.to_string();
        let link_hash = url_utils::url_hash(&final_url);
        let _temp_images = TempImageGuard::new(&self.config.cache_directory, &link_hash);

        let raw_html = match html {
            Some(html) => html.to_string(),
            None => match self.fetcher.fetch_html(&final_url) {
                Ok(html) => html,
                Err(e) => {
                    warn!(error = %e, "unable to fetch page");
                    return Ok(None);
                }
            },
        };

        let mut article = Article {
            final_url,
            link_hash,
            raw_html,
            ..Article::default()
        };
        if let Err(e) = self.populate(&mut article, &page_url, for_viewer) {
            warn!(error = %e, "extraction stopped early, returning partial article");
        }
        Ok(Some(article))
    }

    fn populate(&self, article: &mut Article, page_url: &Url, for_viewer: bool) -> Result<()> {
        if article.raw_html.trim().is_empty() {
            return Err(Error::Parse("document is empty".to_string()));
        }
        let doc = dom::parse(&article.raw_html);
        let outcome = self.run_stages(&doc, article, page_url, for_viewer);
        article.document = Some(doc);
        outcome
    }

    #[allow(clippy::unnecessary_wraps)]
    fn run_stages(&self, doc: &Document, article: &mut Article, page_url: &Url, for_viewer: bool) -> Result<()> {
        // Caller extractors see the markup before the cleaner strips it.
        article.publish_date = self.config.publish_date_extractor.extract(doc);
        article.additional_data = self.config.additional_data_extractor.extract(doc);
        article.tags = metadata::extract_tags(doc);

        self.cleaner.clean(doc);

        article.title = metadata::extract_title(doc);
        article.meta_description = metadata::extract_meta_description(doc);
        article.meta_keywords = metadata::extract_meta_keywords(doc);
        article.canonical_link = metadata::extract_canonical_link(doc, page_url);
        article.domain = metadata::extract_domain(&article.canonical_link);

        let selection = ContentScorer::new(&self.config.stop_words).select_top_node(doc);
        let Some(top_id) = selection.top_node else {
            debug!("no top node found");
            return Ok(());
        };
        article.top_node = Some(top_id);
        let top = NodeRef::new(top_id, &doc.tree);

        article.movie_embeds = videos::extract_videos(&top);

        if self.config.enable_image_fetching {
            let mut guesser =
                BestImageGuesser::new(&self.config, self.fetcher.as_ref(), page_url.clone(), &article.link_hash);
            let image = guesser.best_image(doc, top_id);
            article.image_candidate_urls = guesser.candidate_urls().to_vec();
            if !image.is_empty() {
                article.top_image = Some(image);
            }
        }

        cleanup::cleanup_node(&top, &selection.scores, &self.config.stop_words);
        article.cleaned_article_text = self.formatter.format(&top, &selection.scores, for_viewer);

        debug!(
            title = %article.title,
            text_len = article.cleaned_article_text.len(),
            embeds = article.movie_embeds.len(),
            "extraction complete"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{ContentInfo, FetchedImage};

    /// Fetcher that serves nothing.
    struct Offline;

    impl Fetcher for Offline {
        fn fetch_html(&self, url: &str) -> Result<String> {
            Err(Error::Fetch(format!("offline: {url}")))
        }

        fn content_info(&self, url: &str) -> Result<ContentInfo> {
            Err(Error::Fetch(format!("offline: {url}")))
        }

        fn fetch_image(&self, url: &str) -> Result<FetchedImage> {
            Err(Error::Fetch(format!("offline: {url}")))
        }
    }

    fn extractor() -> ContentExtractor {
        let config = Configuration {
            cache_directory: std::env::temp_dir().join("rs-goose-unit"),
            ..Configuration::default()
        };
        ContentExtractor::with_fetcher(config, Arc::new(Offline))
    }

    const BODY: &str = "<p>The city council said on Monday that it will vote on the new plan for the park at the end of the month.</p>\
        <p>Residents have asked for more time so that they can read all of the details and talk to their neighbours about it.</p>";

    #[test]
    fn invalid_url_is_an_error() {
        let result = extractor().extract("not a url", Some("<html></html>"), false);

        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn unfetchable_page_is_none() {
        let result = extractor().extract("https://example.com/a", None, false).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn empty_page_returns_partial_article() {
        let article = extractor()
            .extract("https://example.com/#!/story", Some("   "), false)
            .unwrap()
            .unwrap();

        assert_eq!(article.final_url, "https://example.com/?_escaped_fragment_=/story");
        assert_eq!(article.link_hash.len(), 64);
        assert!(article.title.is_empty());
        assert!(article.document.is_none());
    }

    #[test]
    fn extracts_body_text() {
        let html = format!(
            "<html><head><title>Park vote | City News</title></head><body>\
             <div id=\"nav\"><a href=\"/\">Home</a></div><div class=\"story\">{BODY}</div></body></html>"
        );

        let article = extractor()
            .extract("https://example.com/park", Some(&html), false)
            .unwrap()
            .unwrap();

        assert_eq!(article.title, "Park vote");
        assert_eq!(article.domain, "example.com");
        assert!(article.top_node.is_some());
        assert!(article.cleaned_article_text.starts_with("The city council said"));
        assert!(article.cleaned_article_text.contains("\n\nResidents have asked"));
        assert!(article.top_image.is_none());
    }

    #[test]
    fn page_without_prose_has_no_top_node() {
        let html = "<html><head><title>Links</title></head><body><ul><li><a href=\"/a\">A</a></li></ul></body></html>";

        let article = extractor()
            .extract("https://example.com/links", Some(html), false)
            .unwrap()
            .unwrap();

        assert_eq!(article.title, "Links");
        assert!(article.top_node.is_none());
        assert!(article.cleaned_article_text.is_empty());
    }
}
