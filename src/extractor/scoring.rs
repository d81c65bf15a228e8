//! Content Node Scorer
//!
//! Paragraph-like nodes (`p`, `pre`, `td`) with real prose vote for their
//! parent (full weight) and grandparent (half weight). The element with the
//! most votes is the top node. Scores live in a [`NodeScores`] side table
//! keyed by node handle, so the DOM itself is never annotated.

use std::collections::HashMap;

use dom_query::{Document, NodeId, NodeRef};
use tracing::debug;

use crate::dom;
use crate::link_density::is_high_link_density;
use crate::text::StopWords;

/// Accumulated score and number of contributing candidates for one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeScore {
    pub score: i32,
    pub count: u32,
}

/// Scores gathered during one extraction, keyed by node handle.
#[derive(Debug, Clone, Default)]
pub struct NodeScores {
    scores: HashMap<NodeId, NodeScore>,
}

impl NodeScores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `id`, `None` when no candidate ever scored it.
    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<NodeScore> {
        self.scores.get(id).copied()
    }

    /// Accumulated score, 0 for unscored nodes.
    #[must_use]
    pub fn score(&self, id: &NodeId) -> i32 {
        self.get(id).map_or(0, |s| s.score)
    }

    /// Number of contributing candidates, 0 for unscored nodes.
    #[must_use]
    pub fn count(&self, id: &NodeId) -> u32 {
        self.get(id).map_or(0, |s| s.count)
    }

    pub fn add_score(&mut self, id: NodeId, delta: i32) {
        self.scores.entry(id).or_default().score += delta;
    }

    pub fn add_count(&mut self, id: NodeId, delta: u32) {
        self.scores.entry(id).or_default().count += delta;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Outcome of top-node selection.
#[derive(Debug, Clone, Default)]
pub struct TopNodeSelection {
    pub top_node: Option<NodeId>,
    pub scores: NodeScores,
}

/// Candidates with more stop words than this are considered prose.
const MIN_STOP_WORDS: usize = 2;
/// A following paragraph this rich makes a candidate boostable.
const BOOST_SIBLING_STOP_WORDS: usize = 5;
/// Boostable siblings must be found within this many element steps.
const MAX_BOOST_STEPS: usize = 3;
/// Candidate count above which the bottom quarter is penalized.
const NEGATIVE_SCORING_THRESHOLD: usize = 15;

/// Whether `node` has enough stop words and is not link-dominated.
#[must_use]
pub fn is_qualifying_candidate(node: &NodeRef, stop_words: &StopWords) -> bool {
    stop_words.stop_word_count(&dom::text(node)) > MIN_STOP_WORDS && !is_high_link_density(node)
}

/// Picks the element most likely to hold the article body.
#[derive(Debug, Clone, Copy)]
pub struct ContentScorer<'a> {
    stop_words: &'a StopWords,
}

impl<'a> ContentScorer<'a> {
    #[must_use]
    pub fn new(stop_words: &'a StopWords) -> Self {
        Self { stop_words }
    }

    /// Score every candidate and return the best-scoring parent.
    #[must_use]
    pub fn select_top_node(&self, doc: &Document) -> TopNodeSelection {
        let nodes_with_text: Vec<NodeRef> = dom::select_all(doc, "p, pre, td")
            .into_iter()
            .filter(|node| is_qualifying_candidate(node, self.stop_words))
            .collect();

        let number_of_nodes = nodes_with_text.len();
        let bottom_nodes_for_negative_score = number_of_nodes as f32 * 0.25;
        let mut starting_boost = 1.0f32;
        let mut scores = NodeScores::new();
        let mut parent_nodes: Vec<NodeId> = Vec::new();

        for (i, node) in nodes_with_text.iter().enumerate() {
            let mut boost_score = 0.0f32;
            if self.is_ok_to_boost(node) {
                boost_score = (1.0 / starting_boost) * 50.0;
                starting_boost += 1.0;
            }

            if number_of_nodes > NEGATIVE_SCORING_THRESHOLD {
                let from_bottom = (number_of_nodes - i) as f32;
                if from_bottom <= bottom_nodes_for_negative_score {
                    let booster = bottom_nodes_for_negative_score - from_bottom;
                    boost_score = -booster.powi(2);
                    // Deep pages keep a small bonus instead of a large penalty.
                    if boost_score.abs() > 40.0 {
                        boost_score = 5.0;
                    }
                }
            }

            let stop_word_count = self.stop_words.stop_word_count(&dom::text(node));
            let up_score = (stop_word_count as f32 + boost_score) as i32;

            let Some(parent) = dom::parent_element(node) else {
                continue;
            };
            scores.add_score(parent.id, up_score);
            scores.add_count(parent.id, 1);
            if !parent_nodes.contains(&parent.id) {
                parent_nodes.push(parent.id);
            }

            if let Some(grandparent) = dom::parent_element(&parent) {
                scores.add_score(grandparent.id, up_score / 2);
                scores.add_count(grandparent.id, 1);
                if !parent_nodes.contains(&grandparent.id) {
                    parent_nodes.push(grandparent.id);
                }
            }
        }

        let mut top_node = None;
        let mut top_node_score = 0;
        for id in &parent_nodes {
            let score = scores.score(id);
            if score > top_node_score {
                top_node = Some(*id);
                top_node_score = score;
            }
            if top_node.is_none() {
                top_node = Some(*id);
            }
        }

        debug!(
            candidates = number_of_nodes,
            parents = parent_nodes.len(),
            top_score = top_node_score,
            found = top_node.is_some(),
            "scored content candidates"
        );
        TopNodeSelection { top_node, scores }
    }

    /// A candidate is boostable when a following sibling paragraph, at most
    /// three element steps away, carries more than five stop words. Guards
    /// against image captions that precede the real text.
    fn is_ok_to_boost(&self, node: &NodeRef) -> bool {
        let mut steps_away = 0;
        let mut sibling = dom::next_element_sibling(node);
        while let Some(current) = sibling {
            if dom::is_tag(&current, "p") {
                if steps_away >= MAX_BOOST_STEPS {
                    return false;
                }
                if self.stop_words.stop_word_count(&dom::text(&current)) > BOOST_SIBLING_STOP_WORDS {
                    return true;
                }
            }
            steps_away += 1;
            sibling = dom::next_element_sibling(&current);
        }
        false
    }
}
