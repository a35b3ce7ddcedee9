//! Heuristic text analysis: sentence segmentation, key phrase and entity
//! extraction.
//!
//! None of this is real NLP. The capitalization patterns, suffix list and
//! stop words below are fixed rule tables so results are reproducible.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use super::embedding;
use super::models::{Entity, EntityKind, KeyPhrase, TextAnalysis};
use crate::config::AnalysisConfig;

/// Characters that end a sentence
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Words ignored by single-word scoring and embeddings
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "up", "about", "into", "through", "during", "before", "after", "above", "below",
    "between", "among", "within", "without", "against", "toward", "upon", "beneath", "beside",
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should", "may", "might", "must", "can", "shall", "this", "that",
    "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us",
    "them",
];

/// Single words must be longer than this to be scored
const MIN_SCORED_WORD_CHARS: usize = 4;

/// Capitalized spans may have at most this many words
const MAX_PHRASE_WORDS: usize = 4;
const MAX_PROPER_NOUN_WORDS: usize = 3;
const MAX_QUOTED_WORDS: usize = 4;

const TECHNICAL_TERM_CONFIDENCE: f32 = 0.7;
const NUMBER_CONFIDENCE: f32 = 0.8;
const QUOTED_CONFIDENCE: f32 = 0.9;

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Split text on runs of non-word characters, skipping empty pieces.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
}

/// Raw clauses between sentence terminators, unfiltered and untrimmed.
pub fn clauses(text: &str) -> impl Iterator<Item = &str> {
    text.split(SENTENCE_TERMINATORS)
}

/// Count case-insensitive whole-word matches of `term` in `text`.
pub fn count_whole_word(term: &str, text: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))) {
        Ok(re) => re.find_iter(text).count(),
        Err(e) => {
            log::warn!("Could not build word pattern for {:?}: {}", term, e);
            0
        }
    }
}

/// Keep the first item for each case-insensitive text, preserving order.
pub(crate) fn dedup_case_insensitive<T>(items: Vec<T>, text: impl Fn(&T) -> &str) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(text(item).to_lowercase()))
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Rule-based analyzer holding its compiled patterns
pub struct TextAnalyzer {
    config: AnalysisConfig,
    /// One to three leading capitalized words
    capitalized_span: Regex,
    /// A run of capitalized words
    proper_noun: Regex,
    /// Words ending in a nominalizing suffix
    technical_term: Regex,
    /// A number, optionally followed by a unit word
    numeric: Regex,
    /// Text between double quotes
    quoted: Regex,
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl TextAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            capitalized_span: Regex::new(r"\b(?:[A-Z][a-z]*\s+){0,2}[A-Z][a-z]*\b")
                .expect("Invalid regex"),
            proper_noun: Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("Invalid regex"),
            technical_term: Regex::new(r"(?i)\b[a-z]+(?:-[a-z]+)*(?:ing|tion|sion|ment|ness|ity|ism)\b")
                .expect("Invalid regex"),
            numeric: Regex::new(
                r"(?i)\b\d+(?:\.\d+)?(?:\s*(?:percent|%|million|billion|thousand|years?|days?|hours?|minutes?))?\b",
            )
            .expect("Invalid regex"),
            quoted: Regex::new(r#""([^"]+)""#).expect("Invalid regex"),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run every extractor over `text`
    pub fn analyze(&self, text: &str) -> TextAnalysis {
        TextAnalysis {
            sentences: self.segment_sentences(text),
            key_phrases: self.extract_key_phrases(text),
            entities: self.extract_entities(text),
        }
    }

    /// Split on `.`, `!` and `?` runs and keep trimmed fragments longer than
    /// the configured minimum.
    pub fn segment_sentences(&self, text: &str) -> Vec<String> {
        clauses(text)
            .map(str::trim)
            .filter(|s| s.chars().count() > self.config.min_sentence_chars)
            .map(str::to_string)
            .collect()
    }

    /// Capitalized spans plus statistically salient single words, best first.
    pub fn extract_key_phrases(&self, text: &str) -> Vec<KeyPhrase> {
        let mut phrases = Vec::new();

        for sentence in self.segment_sentences(text) {
            for m in self.capitalized_span.find_iter(&sentence) {
                let phrase = m.as_str().trim();
                if word_count(phrase) <= MAX_PHRASE_WORDS && phrase.chars().count() > 4 {
                    phrases.push(KeyPhrase::new(phrase, phrase_importance(phrase, text)));
                }
            }
        }

        phrases.extend(self.score_single_words(text));

        let mut phrases = dedup_case_insensitive(phrases, |p| p.text.as_str());
        phrases.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        phrases.truncate(self.config.max_key_phrases);
        phrases
    }

    /// `tf * ln(total / freq)` over lowercase non-stop words, in first-seen order.
    fn score_single_words(&self, text: &str) -> Vec<KeyPhrase> {
        let lower = text.to_lowercase();
        let candidates: Vec<&str> = words(&lower)
            .filter(|w| w.chars().count() > MIN_SCORED_WORD_CHARS && !is_stop_word(w))
            .collect();
        let total = candidates.len();
        if total == 0 {
            return Vec::new();
        }

        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for &word in &candidates {
            let count = counts.entry(word).or_insert(0);
            if *count == 0 {
                order.push(word);
            }
            *count += 1;
        }

        order
            .into_iter()
            .filter_map(|word| {
                let freq = counts[word] as f64;
                let tf = freq / total as f64;
                let importance = (tf * (total as f64 / freq).ln()) as f32;
                (importance > self.config.word_score_threshold)
                    .then(|| KeyPhrase::new(capitalize(word), importance))
            })
            .collect()
    }

    /// Four independent heuristic extractors, merged and ranked by confidence.
    pub fn extract_entities(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        for m in self.proper_noun.find_iter(text) {
            let entity = m.as_str().trim();
            if word_count(entity) <= MAX_PROPER_NOUN_WORDS {
                entities.push(Entity::new(
                    entity,
                    EntityKind::NamedOrPlace,
                    proper_noun_confidence(entity, text),
                ));
            }
        }

        for m in self.technical_term.find_iter(text) {
            if m.as_str().chars().count() > 6 {
                entities.push(Entity::new(
                    m.as_str(),
                    EntityKind::Concept,
                    TECHNICAL_TERM_CONFIDENCE,
                ));
            }
        }

        for m in self.numeric.find_iter(text) {
            entities.push(Entity::new(m.as_str(), EntityKind::Number, NUMBER_CONFIDENCE));
        }

        for caps in self.quoted.captures_iter(text) {
            let quoted = &caps[1];
            if quoted.chars().count() > 3 && word_count(quoted) <= MAX_QUOTED_WORDS {
                entities.push(Entity::new(quoted, EntityKind::Concept, QUOTED_CONFIDENCE));
            }
        }

        let mut entities: Vec<Entity> = dedup_case_insensitive(entities, |e| e.text.as_str())
            .into_iter()
            .filter(|e| e.confidence > self.config.min_entity_confidence)
            .collect();
        entities.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        entities.truncate(self.config.max_entities);
        entities
    }

    /// Hashed bag-of-words embedding with the configured dimensionality
    pub fn embed(&self, text: &str) -> Vec<f32> {
        embedding::embed(text, self.config.embedding_dimensions)
    }
}

/// Tokens of `text` contained in the phrase, scaled by a phrase-length bonus.
fn phrase_importance(phrase: &str, text: &str) -> f32 {
    let lower = phrase.to_lowercase();
    let occurrences = words(text)
        .filter(|token| lower.contains(&token.to_lowercase()))
        .count();
    let length_bonus = match word_count(phrase) {
        2 => 1.2,
        3 => 1.5,
        4 => 1.3,
        _ => 1.0,
    };
    (occurrences as f32 / 10.0 * length_bonus).min(1.0)
}

fn proper_noun_confidence(entity: &str, text: &str) -> f32 {
    let occurrences = count_whole_word(entity, text);
    let all_caps = entity
        .chars()
        .all(|c| c.is_uppercase() || !c.is_alphabetic());

    let mut confidence = (occurrences as f32 / 5.0).min(1.0);
    if all_caps {
        confidence += 0.2;
    }
    if entity.contains(' ') {
        confidence += 0.3;
    }
    confidence.min(1.0)
}
