//! Movie embed extraction.

use dom_query::{NodeId, NodeRef};

use crate::dom;
use crate::patterns::VIDEO_HOSTS;

/// Video players around the article body.
///
/// Collects `<embed>`, then `<object>`, then `<iframe>` elements under the
/// top node's parent whose `src` points at a known video host.
#[must_use]
pub fn extract_videos(top: &NodeRef) -> Vec<NodeId> {
    let Some(scope) = dom::parent_element(top) else {
        return Vec::new();
    };

    ["embed", "object", "iframe"]
        .iter()
        .flat_map(|tag| dom::select(&scope, tag))
        .filter(|node| dom::attr(node, "src").is_some_and(|src| VIDEO_HOSTS.is_match(&src)))
        .map(|node| node.id)
        .collect()
}
