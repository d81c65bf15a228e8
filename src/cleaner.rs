//! Document Cleaner
//!
//! Prepares a freshly parsed document for scoring: flattens inline emphasis,
//! drops scripts and known boilerplate containers, and turns text-only
//! `<div>`/`<span>` wrappers into paragraphs so their prose is seen by the
//! paragraph scorer. The steps run in a fixed order; reordering them changes
//! which nodes survive.

use std::sync::LazyLock;

use dom_query::{Document, NodeRef};
use regex::Regex;
use tracing::{debug, warn};

use crate::dom;
use crate::error::{Error, Result};
use crate::patterns::{
    BLOCK_ELEMENTS, BOILERPLATE_NODES, CAPTION, DROP_CAP, ENTRIES_MORE, FACEBOOK, GOOGLE, TWITTER,
};
use crate::text::{self, ReplaceSequence};

/// Cleans a document in place.
pub trait DocumentCleaner: Send + Sync {
    fn clean(&self, doc: &Document);
}

/// Tab/newline normalization for text merged into synthesized paragraphs.
static TABS_AND_NEWLINES: LazyLock<Option<ReplaceSequence>> = LazyLock::new(|| {
    ReplaceSequence::create("\n", "\n\n")
        .and_then(|seq| seq.append("\t", ""))
        .and_then(|seq| seq.append(r"\A\s+\z", ""))
        .ok()
});

/// The standard cleaning pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDocumentCleaner;

impl DocumentCleaner for DefaultDocumentCleaner {
    fn clean(&self, doc: &Document) {
        clean_em_tags(doc);
        remove_drop_caps(doc);
        remove_scripts_and_styles(doc);
        remove_boilerplate(doc);
        for pattern in [&*CAPTION, &*GOOGLE, &*ENTRIES_MORE, &*FACEBOOK, &*TWITTER] {
            remove_nodes_via_regex(doc, pattern);
        }
        convert_to_paragraphs(doc, "div");
        convert_to_paragraphs(doc, "span");
    }
}

/// `<em>` without images becomes plain text.
fn clean_em_tags(doc: &Document) {
    for em in dom::select_all(doc, "em") {
        if dom::has_descendant(&em, &["img"]) {
            continue;
        }
        dom::replace_with_text(&em, &dom::text(&em));
    }
}

/// Oversized first-letter spans become plain text.
fn remove_drop_caps(doc: &Document) {
    for span in dom::select_all(doc, "span[class]") {
        if DROP_CAP.is_match(&dom::attr_or_empty(&span, "class")) {
            dom::replace_with_text(&span, &dom::text(&span));
        }
    }
}

fn remove_scripts_and_styles(doc: &Document) {
    for node in dom::select_all(doc, "script, style") {
        dom::remove(&node);
    }
}

/// Elements inside `<body>` whose id, class or name matches the boilerplate denylist.
fn remove_boilerplate(doc: &Document) {
    let mut removed = 0usize;
    for attribute in ["id", "class", "name"] {
        for node in dom::select_all(doc, &format!("body [{attribute}]")) {
            if !dom::is_attached(&node) {
                continue;
            }
            if BOILERPLATE_NODES.is_match(&dom::attr_or_empty(&node, attribute)) {
                dom::remove(&node);
                removed += 1;
            }
        }
    }
    debug!(removed, "removed boilerplate nodes");
}

/// Elements anywhere below the root whose id or class matches `pattern`.
fn remove_nodes_via_regex(doc: &Document, pattern: &Regex) {
    for attribute in ["id", "class"] {
        for node in dom::select_all(doc, &format!("[{attribute}]")) {
            if dom::is_tag(&node, "html") || dom::is_tag(&node, "body") || !dom::is_attached(&node) {
                continue;
            }
            if pattern.is_match(&dom::attr_or_empty(&node, attribute)) {
                dom::remove(&node);
            }
        }
    }
}

fn convert_to_paragraphs(doc: &Document, tag: &str) {
    let mut converted = 0usize;
    for element in dom::select_all(doc, tag) {
        if !dom::is_attached(&element) {
            continue;
        }
        match convert_element(&element) {
            Ok(true) => converted += 1,
            Ok(false) => {}
            Err(e) => warn!(tag, error = %e, "left element unconverted"),
        }
    }
    debug!(tag, converted, "converted text-only wrappers to paragraphs");
}

/// Convert one div/span. Returns whether the tree changed.
fn convert_element(element: &NodeRef) -> Result<bool> {
    let inner = dom::inner_html(element);

    if !BLOCK_ELEMENTS.is_match(&inner.to_lowercase()) {
        let paragraph = dom::new_element_with_html(element, "p", &inner);
        dom::replace(element, &paragraph);
        return Ok(true);
    }

    // Merge loose text (plus a link right before it) into one paragraph so
    // link fragments are not scored as separate low-value paragraphs.
    let mut replacement = String::new();
    let mut consumed = Vec::new();
    for kid in dom::child_nodes(element) {
        if !kid.is_text() {
            continue;
        }
        let raw = kid.text().to_string();
        if raw.is_empty() {
            continue;
        }
        let cleaned = match TABS_AND_NEWLINES.as_ref() {
            Some(seq) => seq.replace_all(&raw),
            None => raw,
        };
        if cleaned.chars().count() <= 1 {
            continue;
        }
        if let Some(previous) = kid.prev_sibling() {
            if dom::is_tag(&previous, "a") {
                replacement.push_str(&dom::outer_html(&previous));
            }
        }
        replacement.push_str(&text::escape_html(&cleaned));
        consumed.push(kid);
    }

    if replacement.is_empty() {
        return Ok(false);
    }

    let first = element
        .first_child()
        .ok_or_else(|| Error::Parse("wrapper has no child nodes".to_string()))?;
    let paragraph = dom::new_element_with_html(element, "p", &replacement);
    dom::insert_before(&first, &paragraph);
    for kid in consumed {
        dom::remove(&kid);
    }
    Ok(true)
}
