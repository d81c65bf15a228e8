//! DOM Operations Adapter
//!
//! Thin layer over the `dom_query` arena DOM. Nodes are addressed by
//! [`NodeId`] handles into the document's tree, so removing or replacing a
//! node never invalidates handles held elsewhere: a removed node simply
//! becomes detached (it has no parent) and drops out of selector queries.
//!
//! Text helpers follow browser-style "rendered text" rules: whitespace is
//! collapsed, block-level boundaries separate words, and script/style
//! contents are ignored.

pub use dom_query::{Document, NodeId, NodeRef, Selection};

/// Tags whose boundaries separate words when flattening text.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt",
    "figcaption", "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tbody", "td",
    "tfoot", "th", "thead", "tr", "ul",
];

/// Tags whose contents never count as text.
const DATA_TAGS: &[&str] = &["script", "style", "noscript", "template"];

// === Parsing ===

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Node Information ===

/// Lowercase tag name of an element, `None` for text/comment/document nodes.
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|name| name.to_ascii_lowercase())
}

/// Whether `node` is an element with the given (lowercase) tag.
#[must_use]
pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
    tag_name(node).is_some_and(|t| t == tag)
}

/// Attribute value as an owned string.
#[inline]
#[must_use]
pub fn attr(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|value| value.to_string())
}

/// Attribute value, or an empty string when absent.
#[inline]
#[must_use]
pub fn attr_or_empty(node: &NodeRef, name: &str) -> String {
    attr(node, name).unwrap_or_default()
}

/// Whether the node is still attached to a parent.
#[inline]
#[must_use]
pub fn is_attached(node: &NodeRef) -> bool {
    node.parent().is_some()
}

// === Text Content ===

/// Rendered text of a node and its descendants, whitespace-normalized and trimmed.
#[must_use]
pub fn text(node: &NodeRef) -> String {
    if node.is_text() {
        return normalize_whitespace(&node.text());
    }
    let mut raw = String::new();
    collect_text(node, &mut raw);
    normalize_whitespace(&raw)
}

fn collect_text(node: &NodeRef, out: &mut String) {
    let mut child = node.first_child();
    while let Some(current) = child {
        if current.is_text() {
            out.push_str(&current.text());
        } else if let Some(tag) = tag_name(&current) {
            if !DATA_TAGS.contains(&tag.as_str()) {
                let block = BLOCK_TAGS.contains(&tag.as_str());
                if block {
                    out.push(' ');
                }
                collect_text(&current, out);
                if block {
                    out.push(' ');
                }
            }
        }
        child = current.next_sibling();
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Outer HTML of a node.
#[inline]
#[must_use]
pub fn outer_html(node: &NodeRef) -> String {
    node.html().to_string()
}

/// Inner HTML of a node.
#[inline]
#[must_use]
pub fn inner_html(node: &NodeRef) -> String {
    node.inner_html().to_string()
}

// === Tree Navigation ===

/// Parent node if it is an element.
#[must_use]
pub fn parent_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    node.parent().filter(NodeRef::is_element)
}

/// All direct child nodes, including text nodes.
#[must_use]
pub fn child_nodes<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut nodes = Vec::new();
    let mut child = node.first_child();
    while let Some(current) = child {
        child = current.next_sibling();
        nodes.push(current);
    }
    nodes
}

/// Direct element children.
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    child_nodes(node).into_iter().filter(NodeRef::is_element).collect()
}

/// Next sibling that is an element, skipping text and comments.
#[must_use]
pub fn next_element_sibling<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut sibling = node.next_sibling();
    while let Some(current) = sibling {
        if current.is_element() {
            return Some(current);
        }
        sibling = current.next_sibling();
    }
    None
}

/// Previous sibling that is an element, skipping text and comments.
#[must_use]
pub fn previous_element_sibling<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut sibling = node.prev_sibling();
    while let Some(current) = sibling {
        if current.is_element() {
            return Some(current);
        }
        sibling = current.prev_sibling();
    }
    None
}

// === Querying ===

/// Descendant elements of `node` matching a CSS selector, in document order.
#[must_use]
pub fn select<'a>(node: &NodeRef<'a>, selector: &str) -> Vec<NodeRef<'a>> {
    Selection::from(*node).select(selector).nodes().to_vec()
}

/// Elements of the whole document matching a CSS selector, in document order.
#[must_use]
pub fn select_all<'a>(doc: &'a Document, selector: &str) -> Vec<NodeRef<'a>> {
    doc.select(selector).nodes().to_vec()
}

/// Whether `node` has at least one descendant with one of the given tags.
#[must_use]
pub fn has_descendant(node: &NodeRef, tags: &[&str]) -> bool {
    tags.iter().any(|tag| !select(node, tag).is_empty())
}

// === Tree Manipulation ===

/// Detach a node from its parent. Detached nodes keep their handle.
#[inline]
pub fn remove(node: &NodeRef) {
    node.remove_from_parent();
}

/// Replace an element with a single text node carrying `text`.
pub fn replace_with_text(node: &NodeRef, text: &str) {
    let text_node = node.tree.new_text(text.to_string());
    node.replace_with(&text_node.id);
}

/// Create a detached `<tag>` element whose content is parsed from `html`.
#[must_use]
pub fn new_element_with_html<'a>(node: &NodeRef<'a>, tag: &str, html: &str) -> NodeRef<'a> {
    let element = node.tree.new_element(tag);
    element.set_html(html.to_string());
    element
}

/// Replace `node` with `replacement`.
#[inline]
pub fn replace(node: &NodeRef, replacement: &NodeRef) {
    node.replace_with(&replacement.id);
}

/// Insert `new_node` immediately before `reference`.
#[inline]
pub fn insert_before(reference: &NodeRef, new_node: &NodeRef) {
    reference.insert_before(&new_node.id);
}

/// Insert `new_node` as the first child of `parent`.
pub fn prepend(parent: &NodeRef, new_node: &NodeRef) {
    match parent.first_child() {
        Some(first) => first.insert_before(&new_node.id),
        None => parent.append_child(&new_node.id),
    }
}
