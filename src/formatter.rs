//! Output Formatter
//!
//! Turns the cleaned top node into the article text. Plain output is one
//! paragraph per block separated by blank lines. Viewer output prunes less,
//! leaving links and inline formatting in the tree for rendering.

use std::sync::Arc;

use dom_query::NodeRef;
use tracing::debug;

use crate::dom;
use crate::extractor::scoring::NodeScores;
use crate::text::{self, StopWords};

/// Elements with fewer stop words are dropped from plain output.
const MIN_STOP_WORDS: usize = 5;

/// Converts a top node into final text.
pub trait OutputFormatter: Send + Sync {
    /// Format `top`. May mutate the subtree under `top`.
    fn format(&self, top: &NodeRef, scores: &NodeScores, for_viewer: bool) -> String;
}

/// The standard formatter.
#[derive(Debug, Clone, Default)]
pub struct DefaultOutputFormatter {
    stop_words: Arc<StopWords>,
}

impl DefaultOutputFormatter {
    #[must_use]
    pub fn new(stop_words: Arc<StopWords>) -> Self {
        Self { stop_words }
    }

    /// Plain text: links, bold and italics flattened, short blocks dropped.
    pub fn formatted_text(&self, top: &NodeRef, scores: &NodeScores) -> String {
        remove_nodes_with_negative_scores(top, scores);
        convert_links_to_text(top);
        replace_tags_with_text(top);
        self.remove_paragraphs_with_few_words(top);

        let text = paragraph_text(top);
        debug!(chars = text.len(), "formatted plain text");
        text
    }

    /// Viewer text: only negative-scored and empty elements are dropped.
    ///
    /// Links, bold and short blocks stay in the tree under `top` for
    /// rendering; the returned text is built the same way as plain text.
    pub fn formatted_text_for_viewer(&self, top: &NodeRef, scores: &NodeScores) -> String {
        remove_nodes_with_negative_scores(top, scores);
        remove_empty_paragraphs(top);

        let text = paragraph_text(top);
        debug!(chars = text.len(), "formatted viewer text");
        text
    }

    fn remove_paragraphs_with_few_words(&self, top: &NodeRef) {
        for element in dom::select(top, "*") {
            if !dom::is_attached(&element) {
                continue;
            }
            let stop_words = self.stop_words.stop_word_count(&dom::text(&element));
            if stop_words < MIN_STOP_WORDS && !has_embedded_media(&element) {
                dom::remove(&element);
            }
        }
    }
}

impl OutputFormatter for DefaultOutputFormatter {
    fn format(&self, top: &NodeRef, scores: &NodeScores, for_viewer: bool) -> String {
        if for_viewer {
            self.formatted_text_for_viewer(top, scores)
        } else {
            self.formatted_text(top, scores)
        }
    }
}

/// `top` itself when it is a paragraph, then every `<p>` below it.
fn paragraphs_of<'a>(top: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut paragraphs = Vec::new();
    if dom::is_tag(top, "p") {
        paragraphs.push(*top);
    }
    paragraphs.extend(dom::select(top, "p"));
    paragraphs
}

/// Unescaped, trimmed text of each non-empty paragraph, separated by blank lines.
fn paragraph_text(top: &NodeRef) -> String {
    let paragraphs: Vec<String> = paragraphs_of(top)
        .iter()
        .map(|p| text::unescape_html(&dom::text(p)).trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    paragraphs.join("\n\n")
}

/// An `<object>`/`<embed>` itself or one below it.
fn has_embedded_media(element: &NodeRef) -> bool {
    dom::is_tag(element, "object")
        || dom::is_tag(element, "embed")
        || dom::has_descendant(element, &["object", "embed"])
}

/// Descendants that were scored below 1 are removed.
fn remove_nodes_with_negative_scores(top: &NodeRef, scores: &NodeScores) {
    for element in dom::select(top, "*") {
        if scores.get(&element.id).is_some_and(|s| s.score < 1) {
            dom::remove(&element);
        }
    }
}

fn convert_links_to_text(top: &NodeRef) {
    for link in dom::select(top, "a") {
        if !dom::has_descendant(&link, &["img"]) {
            dom::replace_with_text(&link, &dom::text(&link));
        }
    }
}

fn replace_tags_with_text(top: &NodeRef) {
    for tag in ["strong", "b", "i"] {
        for element in dom::select(top, tag) {
            dom::replace_with_text(&element, &dom::text(&element));
        }
    }
}

fn remove_empty_paragraphs(top: &NodeRef) {
    for element in dom::select(top, "*") {
        if !dom::is_attached(&element) {
            continue;
        }
        if dom::text(&element).trim().is_empty() && !has_embedded_media(&element) && !is_void_media(&element) {
            dom::remove(&element);
        }
    }
}

/// Images and line breaks carry no text but stay in the tree for rendering.
fn is_void_media(element: &NodeRef) -> bool {
    ["img", "br", "object", "embed", "iframe"]
        .iter()
        .any(|tag| dom::is_tag(element, tag))
        || dom::has_descendant(element, &["img"])
}
