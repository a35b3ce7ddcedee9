//! Merges key phrases and entities into a ranked concept list

use crate::analysis::text::{count_whole_word, dedup_case_insensitive};
use crate::analysis::{Entity, KeyPhrase};

use super::models::{ConceptCandidate, ConceptCategory};

/// Whole-word occurrences needed for a frequency of 1.0
const FREQUENCY_SATURATION: f32 = 10.0;

pub struct ConceptRanker {
    max_concepts: usize,
}

impl ConceptRanker {
    pub fn new(max_concepts: usize) -> Self {
        Self { max_concepts }
    }

    /// Turn phrases (category "concept") and entities (category by kind)
    /// into candidates, then rank them.
    pub fn rank(&self, phrases: &[KeyPhrase], entities: &[Entity], content: &str) -> Vec<ConceptCandidate> {
        let from_phrases = phrases.iter().map(|p| {
            ConceptCandidate::new(
                p.text.as_str(),
                p.importance,
                ConceptCategory::Concept,
                frequency(&p.text, content),
            )
        });
        let from_entities = entities.iter().map(|e| {
            ConceptCandidate::new(
                e.text.as_str(),
                e.confidence,
                ConceptCategory::from(e.kind),
                frequency(&e.text, content),
            )
        });

        self.rank_candidates(from_phrases.chain(from_entities).collect())
    }

    /// Deduplicate by lowercase text (first wins), sort by
    /// `importance * frequency` descending and keep the top entries.
    ///
    /// Stable, so re-ranking an already ranked list leaves it unchanged.
    pub fn rank_candidates(&self, candidates: Vec<ConceptCandidate>) -> Vec<ConceptCandidate> {
        let mut ranked = dedup_case_insensitive(candidates, |c| c.text.as_str());
        ranked.sort_by(|a, b| b.score().total_cmp(&a.score()));
        ranked.truncate(self.max_concepts);
        ranked
    }
}

fn frequency(text: &str, content: &str) -> f32 {
    (count_whole_word(text, content) as f32 / FREQUENCY_SATURATION).min(1.0)
}
