//! Result types for extraction output.
//!
//! An [`Article`] owns the cleaned document it was extracted from, so node
//! handles it carries (top node, movie embeds, top image node) stay valid for
//! as long as the article lives.

use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::{DateTime, Utc};
use dom_query::{Document, NodeId, NodeRef};
use serde::{Deserialize, Serialize};

use crate::dom;

/// How the lead image was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageExtractionType {
    /// A known site-specific lead image container.
    Known,
    /// `<link rel="image_src">`.
    LinkTag,
    /// `<meta property="og:image">`.
    OpenGraph,
    /// The largest qualifying image near the article body.
    BigImage,
    #[default]
    None,
}

impl ImageExtractionType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Known => "known",
            Self::LinkTag => "linktag",
            Self::OpenGraph => "opengraph",
            Self::BigImage => "bigimage",
            Self::None => "none",
        }
    }
}

impl fmt::Display for ImageExtractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The lead image picked for an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Absolute image URL, `None` when no image was found.
    pub image_src: Option<String>,

    pub image_extraction_type: ImageExtractionType,

    /// 0 to 100.
    pub confidence_score: u8,

    /// Size in bytes; 0 when unknown.
    pub bytes: u64,

    /// The winning `<img>` in the article's document, when there is one.
    #[serde(skip)]
    pub top_image_node: Option<NodeId>,
}

impl Image {
    /// An image with no source: every stage failed.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.image_src.as_deref().is_none_or(str::is_empty)
    }
}

/// Result of extracting one page.
#[derive(Default)]
pub struct Article {
    pub title: String,
    pub publish_date: Option<DateTime<Utc>>,
    pub meta_description: String,
    pub meta_keywords: String,

    /// `<link rel="canonical">` target, or the page URL when absent.
    pub canonical_link: String,

    /// Host of the canonical link.
    pub domain: String,

    /// The page URL after `#!` rewriting.
    pub final_url: String,

    /// Hex SHA-256 of `final_url`; prefixes temporary image files.
    pub link_hash: String,

    pub cleaned_article_text: String,
    pub raw_html: String,

    /// The element judged to hold the article body.
    pub top_node: Option<NodeId>,

    pub top_image: Option<Image>,

    /// Absolute URLs of the images measured while picking the lead image.
    pub image_candidate_urls: Vec<String>,

    /// Video `<embed>`, `<object>` and `<iframe>` elements next to the body.
    pub movie_embeds: Vec<NodeId>,

    pub tags: HashSet<String>,
    pub additional_data: HashMap<String, String>,

    /// The cleaned document every node handle above points into.
    pub document: Option<Document>,
}

impl Article {
    /// Resolve a node handle against this article's document.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.document.as_ref().map(|doc| NodeRef::new(id, &doc.tree))
    }

    /// The top node, resolved.
    #[must_use]
    pub fn top_node_ref(&self) -> Option<NodeRef<'_>> {
        self.node(self.top_node?)
    }

    /// Outer HTML of the top node after cleanup and formatting.
    #[must_use]
    pub fn top_node_html(&self) -> Option<String> {
        self.top_node_ref().map(|node| dom::outer_html(&node))
    }

    /// Outer HTML of each movie embed.
    #[must_use]
    pub fn movie_embed_html(&self) -> Vec<String> {
        self.movie_embeds
            .iter()
            .filter_map(|id| self.node(*id))
            .map(|node| dom::outer_html(&node))
            .collect()
    }

    /// Serializable view without DOM handles.
    #[must_use]
    pub fn summary(&self) -> ArticleSummary {
        let mut tags: Vec<String> = self.tags.iter().cloned().collect();
        tags.sort();
        ArticleSummary {
            title: self.title.clone(),
            publish_date: self.publish_date,
            meta_description: self.meta_description.clone(),
            meta_keywords: self.meta_keywords.clone(),
            canonical_link: self.canonical_link.clone(),
            domain: self.domain.clone(),
            final_url: self.final_url.clone(),
            cleaned_article_text: self.cleaned_article_text.clone(),
            top_image: self.top_image.clone(),
            image_candidate_urls: self.image_candidate_urls.clone(),
            movie_embeds: self.movie_embed_html(),
            tags,
            additional_data: self.additional_data.clone(),
        }
    }
}

impl fmt::Debug for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Article")
            .field("title", &self.title)
            .field("publish_date", &self.publish_date)
            .field("canonical_link", &self.canonical_link)
            .field("domain", &self.domain)
            .field("top_node", &self.top_node)
            .field("top_image", &self.top_image)
            .field("movie_embeds", &self.movie_embeds.len())
            .field("tags", &self.tags)
            .field("cleaned_article_text", &self.cleaned_article_text.len())
            .finish_non_exhaustive()
    }
}

/// Owned, serializable copy of an [`Article`]'s fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub title: String,
    pub publish_date: Option<DateTime<Utc>>,
    pub meta_description: String,
    pub meta_keywords: String,
    pub canonical_link: String,
    pub domain: String,
    pub final_url: String,
    pub cleaned_article_text: String,
    #[serde(skip_deserializing)]
    pub top_image: Option<Image>,
    pub image_candidate_urls: Vec<String>,
    pub movie_embeds: Vec<String>,
    pub tags: Vec<String>,
    pub additional_data: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_type_names() {
        assert_eq!(ImageExtractionType::OpenGraph.to_string(), "opengraph");
        assert_eq!(ImageExtractionType::BigImage.as_str(), "bigimage");
        assert_eq!(ImageExtractionType::default(), ImageExtractionType::None);
        assert_eq!(
            serde_json::to_string(&ImageExtractionType::LinkTag).ok(),
            Some("\"linktag\"".to_string())
        );
    }

    #[test]
    fn test_empty_image() {
        let image = Image::empty();

        assert!(image.is_empty());
        assert_eq!(image.bytes, 0);
        assert_eq!(image.image_extraction_type, ImageExtractionType::None);
    }

    #[test]
    fn test_article_resolves_nodes() {
        let doc = Document::from(r#"<div id="body"><p>Hello</p></div>"#);
        let id = doc.select("#body").nodes()[0].id;
        let article = Article {
            top_node: Some(id),
            document: Some(doc),
            ..Article::default()
        };

        assert_eq!(article.top_node_ref().map(|n| dom::text(&n)), Some("Hello".to_string()));
        assert!(article.top_node_html().is_some_and(|h| h.contains("<p>Hello</p>")));
    }

    #[test]
    fn test_summary_sorts_tags() {
        let article = Article {
            title: "T".to_string(),
            tags: ["b", "a"].iter().map(ToString::to_string).collect(),
            ..Article::default()
        };
        let summary = article.summary();

        assert_eq!(summary.tags, vec!["a", "b"]);
        assert!(summary.top_image.is_none());
    }
}
