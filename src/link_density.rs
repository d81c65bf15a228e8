//! Link Density Testing
//!
//! Navigation bars, related-story lists and tag clouds are mostly anchor text.
//! The density score is the share of words inside links, scaled by how many
//! links there are, so a paragraph with one inline link stays well under the
//! threshold while a list of ten short links does not.

use dom_query::NodeRef;

use crate::dom;

/// Words are counted by splitting trimmed text on single spaces.
fn count_words(text: &str) -> usize {
    text.trim().split(' ').count()
}

/// Link density score of `node`, `None` when it holds no `<a>` at all.
///
/// `score = (words in link text / words in node text) * number of links`.
/// Link texts are concatenated without a separator before counting, so
/// adjacent links whose texts touch count as one word.
#[must_use]
pub fn link_density_score(node: &NodeRef) -> Option<f64> {
    let mut links = dom::select(node, "a");
    if dom::is_tag(node, "a") {
        links.insert(0, *node);
    }
    if links.is_empty() {
        return None;
    }

    let words = count_words(&dom::text(node));
    let link_text: String = links.iter().map(dom::text).collect();
    let link_words = count_words(&link_text);

    let ratio = link_words as f64 / words as f64;
    Some(ratio * links.len() as f64)
}

/// Whether `node` is dominated by links (score strictly above 1).
///
/// A node without any `<a>` is never high link density.
#[must_use]
pub fn is_high_link_density(node: &NodeRef) -> bool {
    link_density_score(node).is_some_and(|score| score > 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse, select_all};

    #[test]
    fn no_links_is_never_dense() {
        let doc = parse("<p>Plain text without any anchors at all.</p>");
        let p = select_all(&doc, "p")[0];

        assert_eq!(link_density_score(&p), None);
        assert!(!is_high_link_density(&p));
    }

    #[test]
    fn single_inline_link_is_low_density() {
        let doc = parse(
            r#"<p>The council voted on the new budget yesterday and <a href="/x">read more</a> about it here.</p>"#,
        );
        let p = select_all(&doc, "p")[0];

        // 2 link words of 14, one link
        assert!(link_density_score(&p).is_some_and(|s| s < 0.2));
        assert!(!is_high_link_density(&p));
    }

    #[test]
    fn link_list_is_high_density() {
        let doc = parse(
            r#"<div><a href="/a">Home</a> <a href="/b">World news</a> <a href="/c">Sports</a></div>"#,
        );
        let div = select_all(&doc, "div")[0];

        assert!(is_high_link_density(&div));
    }

    #[test]
    fn single_anchor_wrapping_everything_scores_exactly_one() {
        let doc = parse(r#"<p><a href="/x">all of this text is a link</a></p>"#);
        let p = select_all(&doc, "p")[0];

        assert_eq!(link_density_score(&p), Some(1.0));
        assert!(!is_high_link_density(&p));
    }

    #[test]
    fn two_anchors_wrapping_everything_are_dense() {
        let doc = parse(r#"<p><a href="/x">first half of it</a> <a href="/y">second half here</a></p>"#);
        let p = select_all(&doc, "p")[0];

        assert!(is_high_link_density(&p));
    }
}
