//! Node Cleanup / Sibling Rehabilitation
//!
//! Articles are often split across sibling containers (a lead paragraph
//! above the main body, a "continued" block). Before formatting, prose from
//! preceding siblings is copied into the top node, then children that are
//! link lists or carry too little weight are pruned.

use dom_query::NodeRef;
use tracing::debug;

use crate::dom;
use crate::extractor::scoring::{is_qualifying_candidate, NodeScores};
use crate::link_density::is_high_link_density;
use crate::text::{self, StopWords};

/// Baseline used when the top node has no qualifying paragraphs.
const DEFAULT_BASELINE: usize = 100_000;
/// Sibling paragraphs need this share of the baseline to be copied in.
const SIBLING_BASELINE_RATIO: f32 = 0.30;
/// Paragraphs shorter than this (in characters) are dropped from children.
const MIN_PARAGRAPH_CHARS: usize = 25;
/// Children scoring below this share of the top node are dropped.
const CHILD_SCORE_RATIO: f32 = 0.08;

/// Average stop-word count of the qualifying paragraphs under `top`.
#[must_use]
pub fn baseline_score_for_siblings(top: &NodeRef, stop_words: &StopWords) -> usize {
    let mut paragraphs = 0usize;
    let mut total = 0usize;
    for p in dom::select(top, "p") {
        if is_qualifying_candidate(&p, stop_words) {
            paragraphs += 1;
            total += stop_words.stop_word_count(&dom::text(&p));
        }
    }
    if paragraphs == 0 {
        DEFAULT_BASELINE
    } else {
        total / paragraphs
    }
}

/// Parse `html` in front of the first element child of `parent`, or append it.
fn insert_html_at_top(parent: &NodeRef, html: &str) {
    match dom::element_children(parent).first() {
        Some(first) => first.before_html(html.to_string()),
        None => parent.append_html(html.to_string()),
    }
}

/// Copy prose from `top`'s preceding siblings into `top`, nearest sibling last.
///
/// Returns the number of paragraphs added.
pub fn add_siblings(top: &NodeRef, stop_words: &StopWords) -> usize {
    let baseline = baseline_score_for_siblings(top, stop_words);
    let threshold = baseline as f32 * SIBLING_BASELINE_RATIO;
    let mut added = 0;

    let mut current = dom::previous_element_sibling(top);
    while let Some(sibling) = current {
        current = dom::previous_element_sibling(&sibling);

        if dom::is_tag(&sibling, "p") {
            insert_html_at_top(top, &dom::outer_html(&sibling));
            added += 1;
            continue;
        }

        // This sibling's paragraphs keep their order, ahead of the ones
        // already copied from nearer siblings.
        let anchor = dom::element_children(top).first().copied();
        for paragraph in dom::select(&sibling, "p") {
            let paragraph_text = dom::text(&paragraph);
            let score = stop_words.stop_word_count(&paragraph_text);
            if threshold < score as f32 {
                let copy = dom::new_element_with_html(top, "p", &text::escape_html(&paragraph_text));
                match anchor {
                    Some(ref anchor) => dom::insert_before(anchor, &copy),
                    None => top.append_child(&copy.id),
                }
                added += 1;
            }
        }
    }
    added
}

/// Add sibling prose to `top`, then prune its weak children.
pub fn cleanup_node(top: &NodeRef, scores: &NodeScores, stop_words: &StopWords) {
    let added = add_siblings(top, stop_words);
    let top_score = scores.score(&top.id);
    let threshold = top_score as f32 * CHILD_SCORE_RATIO;
    let mut removed = 0usize;

    for child in dom::element_children(top) {
        if dom::is_tag(&child, "p") {
            continue;
        }
        if is_high_link_density(&child) {
            dom::remove(&child);
            removed += 1;
            continue;
        }

        for p in dom::select(&child, "p") {
            if dom::text(&p).chars().count() < MIN_PARAGRAPH_CHARS {
                dom::remove(&p);
            }
        }

        let is_td = dom::is_tag(&child, "td");
        if dom::select(&child, "p").is_empty() && !is_td {
            dom::remove(&child);
            removed += 1;
            continue;
        }

        if (scores.score(&child.id) as f32) < threshold && !is_td {
            dom::remove(&child);
            removed += 1;
        }
    }
    debug!(added, removed, top_score, "cleaned up top node");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse, select_all};
    use crate::extractor::scoring::ContentScorer;

    const PROSE: &str = "The committee said that it would not be able to finish the report \
                         before the end of the year because of the delays in the process.";

    #[test]
    fn baseline_defaults_without_paragraphs() {
        let doc = parse("<div id='t'><span>nothing here</span></div>");
        let top = select_all(&doc, "#t")[0];

        assert_eq!(baseline_score_for_siblings(&top, &StopWords::english()), 100_000);
    }

    #[test]
    fn baseline_is_integer_average() {
        let doc = parse(&format!(
            "<div id='t'><p>{PROSE}</p><p>it is of the and to be</p><p>no</p></div>"
        ));
        let top = select_all(&doc, "#t")[0];
        let stop_words = StopWords::english();
        let expected = (stop_words.stop_word_count(PROSE) + 7) / 2;

        assert_eq!(baseline_score_for_siblings(&top, &stop_words), expected);
    }

    #[test]
    fn preceding_sibling_paragraph_is_copied_in_order() {
        let doc = parse(&format!(
            r#"<body><p>Lead paragraph far away from the story.</p><p>Second lead paragraph nearer.</p>
               <div id="t"><p>{PROSE}</p></div></body>"#
        ));
        let top = select_all(&doc, "#t")[0];

        let added = add_siblings(&top, &StopWords::english());

        assert_eq!(added, 2);
        let texts: Vec<String> = select_all(&doc, "#t > p").iter().map(dom::text).collect();
        assert_eq!(texts[0], "Lead paragraph far away from the story.");
        assert_eq!(texts[1], "Second lead paragraph nearer.");
        assert_eq!(texts[2], PROSE);
    }

    #[test]
    fn copied_sibling_paragraph_keeps_its_attributes() {
        let doc = parse(&format!(
            r#"<body><p class="lede" data-kind="intro">Lead <em>paragraph</em> text.</p>
               <div id="t"><p>{PROSE}</p></div></body>"#
        ));
        let top = select_all(&doc, "#t")[0];

        add_siblings(&top, &StopWords::english());

        let copies = select_all(&doc, "#t > p.lede");
        assert_eq!(copies.len(), 1);
        assert_eq!(dom::attr(&copies[0], "data-kind").as_deref(), Some("intro"));
        assert_eq!(select_all(&doc, "#t > p.lede em").len(), 1);
        assert_eq!(select_all(&doc, "body > p.lede").len(), 1);
    }

    #[test]
    fn weak_sibling_paragraphs_are_not_copied() {
        let doc = parse(&format!(
            r#"<body><div class="promo"><p>Subscribe today</p><p>{PROSE}</p></div>
               <div id="t"><p>{PROSE}</p></div></body>"#
        ));
        let top = select_all(&doc, "#t")[0];

        let added = add_siblings(&top, &StopWords::english());

        assert_eq!(added, 1);
        assert_eq!(select_all(&doc, "#t > p").len(), 2);
    }

    #[test]
    fn cleanup_prunes_links_and_empty_children() {
        let doc = parse(&format!(
            r#"<body><div id="t"><p>{PROSE}</p><p>{PROSE}</p>
               <ul><li><a href="/a">Home</a></li><li><a href="/b">News</a></li></ul>
               <div class="short"><p>Too short</p></div>
               <table><tr><td>cell</td></tr></table></div></body>"#
        ));
        let stop_words = StopWords::english();
        let selection = ContentScorer::new(&stop_words).select_top_node(&doc);
        let top = select_all(&doc, "#t")[0];
        assert_eq!(selection.top_node, Some(top.id));

        cleanup_node(&top, &selection.scores, &stop_words);

        assert!(select_all(&doc, "#t ul").is_empty());
        assert!(select_all(&doc, "#t .short").is_empty());
        assert!(select_all(&doc, "#t table").is_empty());
        assert_eq!(select_all(&doc, "#t > p").len(), 2);
    }
}
