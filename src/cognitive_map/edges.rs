//! Edge scoring and relationship labeling
//!
//! Every unordered node pair gets three signals:
//! - cooccurrence: sentences holding both terms, plus a bonus for closeness
//! - proximity: smallest token distance between the terms in the document
//! - semantic: word-set overlap blended with length similarity
//!
//! Pairs whose weighted sum clears the threshold become edges, labeled from
//! keyword cues in the first clause that mentions both terms.

use std::collections::HashSet;

use regex::Regex;

use crate::analysis::text::{clauses, words};
use crate::config::MapConfig;

use super::models::{MapEdge, MapNode, Relationship};

/// Characters over which the in-sentence closeness bonus halves
const SENTENCE_DISTANCE_SCALE: f32 = 50.0;
/// Tokens over which the proximity signal halves
const TOKEN_DISTANCE_SCALE: f32 = 10.0;
const COOCCURRENCE_SATURATION: f32 = 10.0;
const LENGTH_SIMILARITY_WEIGHT: f32 = 0.3;

/// Raw signals for one pair of terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSignals {
    pub cooccurrence: f32,
    pub proximity: f32,
    pub semantic: f32,
}

/// Lowercased views of a document, computed once per scoring pass
pub struct ScoringContext {
    sentences: Vec<String>,
    clauses: Vec<String>,
    tokens: Vec<String>,
}

impl ScoringContext {
    pub fn new(sentences: &[String], content: &str) -> Self {
        let lower = content.to_lowercase();
        Self {
            sentences: sentences.iter().map(|s| s.to_lowercase()).collect(),
            clauses: clauses(&lower).map(str::to_string).collect(),
            tokens: words(&lower).map(str::to_string).collect(),
        }
    }

    /// First clause containing both terms, empty if none does
    fn shared_clause(&self, a: &str, b: &str) -> &str {
        let a = a.to_lowercase();
        let b = b.to_lowercase();
        self.clauses
            .iter()
            .find(|c| c.contains(&a) && c.contains(&b))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Assigns a relationship label from keyword cues, first match wins
pub struct RelationshipClassifier {
    cues: Vec<(Regex, Relationship)>,
}

impl Default for RelationshipClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationshipClassifier {
    pub fn new() -> Self {
        let table = [
            (r"(?i)\b(is|are|was|were)\b", Relationship::IsA),
            (r"(?i)\b(has|have|contains|includes)\b", Relationship::HasA),
            (r"(?i)\b(causes?|leads? to|results? in)\b", Relationship::Causes),
            (r"(?i)\b(part of|component of|element of)\b", Relationship::PartOf),
            (r"(?i)\b(similar to|like|resembles)\b", Relationship::Similar),
            (r"(?i)\b(opposite|different|unlike)\b", Relationship::Opposite),
        ];
        Self {
            cues: table
                .into_iter()
                .map(|(pattern, rel)| (Regex::new(pattern).expect("Invalid regex"), rel))
                .collect(),
        }
    }

    /// Label the relation found in `context`
    pub fn classify_context(&self, context: &str) -> Relationship {
        self.cues
            .iter()
            .find(|(re, _)| re.is_match(context))
            .map(|(_, rel)| *rel)
            .unwrap_or(Relationship::Related)
    }

    /// Label the relation between two terms of `content`
    pub fn classify(&self, a: &str, b: &str, content: &str) -> Relationship {
        let ctx = ScoringContext::new(&[], content);
        self.classify_context(ctx.shared_clause(a, b))
    }
}

pub struct EdgeScorer {
    cooccurrence_weight: f32,
    proximity_weight: f32,
    semantic_weight: f32,
    threshold: f32,
    max_edges: usize,
    classifier: RelationshipClassifier,
}

impl EdgeScorer {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            cooccurrence_weight: config.cooccurrence_weight,
            proximity_weight: config.proximity_weight,
            semantic_weight: config.semantic_weight,
            threshold: config.edge_threshold,
            max_edges: config.max_edges,
            classifier: RelationshipClassifier::new(),
        }
    }

    pub fn signals(&self, a: &str, b: &str, ctx: &ScoringContext) -> EdgeSignals {
        let a = a.to_lowercase();
        let b = b.to_lowercase();
        EdgeSignals {
            cooccurrence: cooccurrence(&a, &b, &ctx.sentences),
            proximity: proximity(&a, &b, &ctx.tokens),
            semantic: semantic_similarity(&a, &b),
        }
    }

    pub fn weight(&self, signals: &EdgeSignals) -> f32 {
        (signals.cooccurrence * self.cooccurrence_weight
            + signals.proximity * self.proximity_weight
            + signals.semantic * self.semantic_weight)
            .clamp(0.0, 1.0)
    }

    /// Score every pair `i < j`, keep those above the threshold and return
    /// the heaviest, labeled. Edge ids are `edge_<i>_<j>`.
    pub fn score_edges(&self, nodes: &[MapNode], sentences: &[String], content: &str) -> Vec<MapEdge> {
        let ctx = ScoringContext::new(sentences, content);
        let mut edges = Vec::new();

        for (i, first) in nodes.iter().enumerate() {
            for (j, second) in nodes.iter().enumerate().skip(i + 1) {
                let signals = self.signals(&first.text, &second.text, &ctx);
                let weight = self.weight(&signals);
                if weight <= self.threshold {
                    continue;
                }

                let label = self
                    .classifier
                    .classify_context(ctx.shared_clause(&first.text, &second.text));
                edges.push(MapEdge {
                    id: format!("edge_{}_{}", i, j),
                    source_id: first.id.clone(),
                    target_id: second.id.clone(),
                    weight,
                    label: label.to_string(),
                });
            }
        }

        edges.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        edges.truncate(self.max_edges);
        edges
    }
}

/// Char index of `needle` in `haystack`
fn char_position(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte_idx| haystack[..byte_idx].chars().count())
}

/// Terms and sentences are expected in lowercase.
pub fn cooccurrence(a: &str, b: &str, sentences: &[String]) -> f32 {
    let mut count = 0usize;
    let mut closeness = 0.0f32;

    for sentence in sentences {
        if let (Some(pos_a), Some(pos_b)) = (char_position(sentence, a), char_position(sentence, b)) {
            count += 1;
            let distance = pos_a.abs_diff(pos_b) as f32;
            closeness += 1.0 / (1.0 + distance / SENTENCE_DISTANCE_SCALE);
        }
    }

    ((count as f32 + closeness) / COOCCURRENCE_SATURATION).min(1.0)
}

/// Terms and tokens are expected in lowercase. A token matches a term when
/// it contains it, so multi-word terms never match.
pub fn proximity(a: &str, b: &str, tokens: &[String]) -> f32 {
    let positions = |term: &str| -> Vec<usize> {
        tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.contains(term))
            .map(|(i, _)| i)
            .collect()
    };
    let pos_a = positions(a);
    let pos_b = positions(b);

    match min_distance(&pos_a, &pos_b) {
        Some(distance) => 1.0 / (1.0 + distance as f32 / TOKEN_DISTANCE_SCALE),
        None => 0.0,
    }
}

/// Smallest gap between two ascending position lists
fn min_distance(a: &[usize], b: &[usize]) -> Option<usize> {
    let (mut i, mut j) = (0, 0);
    let mut best: Option<usize> = None;

    while i < a.len() && j < b.len() {
        let gap = a[i].abs_diff(b[j]);
        best = Some(best.map_or(gap, |cur| cur.min(gap)));
        if a[i] < b[j] {
            i += 1;
        } else {
            j += 1;
        }
    }

    best
}

/// Jaccard similarity of word sets blended with length similarity.
pub fn semantic_similarity(a: &str, b: &str) -> f32 {
    let words_a: HashSet<String> = words(a).map(str::to_lowercase).collect();
    let words_b: HashSet<String> = words(b).map(str::to_lowercase).collect();

    let union = words_a.union(&words_b).count();
    let jaccard = if union > 0 {
        words_a.intersection(&words_b).count() as f32 / union as f32
    } else {
        0.0
    };

    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let longest = len_a.max(len_b);
    let length_similarity = if longest > 0 {
        1.0 - len_a.abs_diff(len_b) as f32 / longest as f32
    } else {
        0.0
    };

    (jaccard + length_similarity * LENGTH_SIMILARITY_WEIGHT) / (1.0 + LENGTH_SIMILARITY_WEIGHT)
}
