//! Derives question/answer flashcards from analyzed text

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use regex::{NoExpand, RegexBuilder};

use crate::analysis::{TextAnalysis, TextAnalyzer};
use crate::config::{EngineConfig, FlashcardConfig};

use super::models::Flashcard;

/// Extra characters a sentence needs beyond the phrase to count as context
const CONTEXT_MARGIN: usize = 10;

/// Builds definition, fill-in-the-blank and entity cards
pub struct FlashcardGenerator {
    analyzer: TextAnalyzer,
    config: FlashcardConfig,
}

impl Default for FlashcardGenerator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl FlashcardGenerator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            analyzer: TextAnalyzer::new(config.analysis.clone()),
            config: config.flashcards.clone(),
        }
    }

    pub fn generate(&self, document_id: i64, content: &str) -> Vec<Flashcard> {
        self.generate_at(document_id, content, Utc::now())
    }

    /// Generate cards stamped with an explicit creation time
    pub fn generate_at(&self, document_id: i64, content: &str, now: DateTime<Utc>) -> Vec<Flashcard> {
        let analysis = self.analyzer.analyze(content);
        self.generate_from_analysis(document_id, &analysis, now)
    }

    /// Definition cards, then fill-in-the-blank cards, then entity cards,
    /// with repeated (front, back) pairs removed. Every card starts at
    /// difficulty 0 and is due at `now`.
    pub fn generate_from_analysis(
        &self,
        document_id: i64,
        analysis: &TextAnalysis,
        now: DateTime<Utc>,
    ) -> Vec<Flashcard> {
        let mut pairs = Vec::new();

        let mut definitions = 0;
        for phrase in analysis.key_phrases.iter().take(self.config.definition_cards) {
            if let Some(context) = find_context(&phrase.text, &analysis.sentences) {
                pairs.push((format!("What is {}?", phrase.text), context.to_string()));
                definitions += 1;
            }
        }

        let mut blanks = 0;
        for sentence in analysis.sentences.iter().take(self.config.fill_in_sentences) {
            let lower = sentence.to_lowercase();
            let Some(phrase) = analysis
                .key_phrases
                .iter()
                .find(|p| !p.text.is_empty() && lower.contains(&p.text.to_lowercase()))
            else {
                continue;
            };
            if let Some(blanked) = self.blank_out(sentence, &phrase.text) {
                pairs.push((format!("Fill in the blank: {}", blanked), phrase.text.clone()));
                blanks += 1;
            }
        }

        let mut entity_cards = 0;
        for entity in analysis.entities.iter().take(self.config.entity_cards) {
            if let Some(context) = find_context(&entity.text, &analysis.sentences) {
                pairs.push((
                    format!("What do you know about {}?", entity.text),
                    context.to_string(),
                ));
                entity_cards += 1;
            }
        }

        let mut seen = HashSet::new();
        let cards: Vec<Flashcard> = pairs
            .into_iter()
            .filter(|pair| seen.insert(pair.clone()))
            .map(|(front, back)| Flashcard::new(document_id, front, back, now))
            .collect();

        log::debug!(
            "Document {}: {} definition, {} fill-in, {} entity cards, {} after dedup",
            document_id,
            definitions,
            blanks,
            entity_cards,
            cards.len()
        );

        cards
    }

    /// Replace the first case-insensitive occurrence of `phrase` with the
    /// blank marker.
    fn blank_out(&self, sentence: &str, phrase: &str) -> Option<String> {
        let pattern = RegexBuilder::new(&regex::escape(phrase))
            .case_insensitive(true)
            .build();
        match pattern {
            Ok(re) => Some(
                re.replacen(sentence, 1, NoExpand(&self.config.blank_marker))
                    .into_owned(),
            ),
            Err(e) => {
                log::warn!("Could not build blank pattern for {:?}: {}", phrase, e);
                None
            }
        }
    }
}

/// First sentence mentioning `phrase` (case-insensitively) that is more than
/// ten characters longer than it.
fn find_context<'a>(phrase: &str, sentences: &'a [String]) -> Option<&'a str> {
    let needle = phrase.to_lowercase();
    let min_len = phrase.chars().count() + CONTEXT_MARGIN;
    sentences
        .iter()
        .find(|s| s.chars().count() > min_len && s.to_lowercase().contains(&needle))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Entity, EntityKind, KeyPhrase};

    fn analysis() -> TextAnalysis {
        TextAnalysis {
            sentences: vec![
                "Photosynthesis is a process".to_string(),
                "Plants use photosynthesis to convert light".to_string(),
                "Chlorophyll absorbs light in the leaves".to_string(),
            ],
            key_phrases: vec![
                KeyPhrase::new("Photosynthesis", 0.9),
                KeyPhrase::new("Light", 0.5),
                KeyPhrase::new("Unmentioned", 0.4),
            ],
            entities: vec![Entity::new("Chlorophyll", EntityKind::NamedOrPlace, 0.7)],
        }
    }

    #[test]
    fn test_definition_cards_use_first_long_enough_sentence() {
        let now = Utc::now();
        let cards = FlashcardGenerator::default().generate_from_analysis(1, &analysis(), now);

        let photo = cards
            .iter()
            .find(|c| c.front == "What is Photosynthesis?")
            .unwrap();
        // 27 chars is more than 14 + 10
        assert_eq!(photo.back, "Photosynthesis is a process");

        let light = cards.iter().find(|c| c.front == "What is Light?").unwrap();
        assert_eq!(light.back, "Plants use photosynthesis to convert light");

        assert!(!cards.iter().any(|c| c.front == "What is Unmentioned?"));
    }

    #[test]
    fn test_fill_in_blank_replaces_first_matching_phrase_once() {
        let generator = FlashcardGenerator::default();
        let cards = generator.generate_from_analysis(1, &analysis(), Utc::now());

        let blanks: Vec<&Flashcard> = cards
            .iter()
            .filter(|c| c.front.starts_with("Fill in the blank: "))
            .collect();
        assert_eq!(blanks.len(), 3);
        assert_eq!(blanks[0].front, "Fill in the blank: ______ is a process");
        assert_eq!(blanks[0].back, "Photosynthesis");
        // matched case-insensitively, "light" left alone
        assert_eq!(
            blanks[1].front,
            "Fill in the blank: Plants use ______ to convert light"
        );
        assert_eq!(blanks[2].front, "Fill in the blank: Chlorophyll absorbs ______ in the leaves");
        assert_eq!(blanks[2].back, "Light");
    }

    #[test]
    fn test_only_first_occurrence_is_blanked() {
        let analysis = TextAnalysis {
            sentences: vec!["Light travels and light bends".to_string()],
            key_phrases: vec![KeyPhrase::new("Light", 0.5)],
            entities: Vec::new(),
        };
        let cards = FlashcardGenerator::default().generate_from_analysis(1, &analysis, Utc::now());
        let blank = cards
            .iter()
            .find(|c| c.front.starts_with("Fill in the blank"))
            .unwrap();
        assert_eq!(blank.front, "Fill in the blank: ______ travels and light bends");
    }

    #[test]
    fn test_entity_cards() {
        let cards = FlashcardGenerator::default().generate_from_analysis(1, &analysis(), Utc::now());
        let entity = cards
            .iter()
            .find(|c| c.front == "What do you know about Chlorophyll?")
            .unwrap();
        assert_eq!(entity.back, "Chlorophyll absorbs light in the leaves");
    }

    #[test]
    fn test_duplicate_pairs_are_removed() {
        let analysis = TextAnalysis {
            sentences: vec!["Marie Curie won two Nobel prizes".to_string()],
            key_phrases: vec![KeyPhrase::new("Marie Curie", 0.8)],
            entities: vec![
                Entity::new("Marie Curie", EntityKind::NamedOrPlace, 0.9),
                Entity::new("Marie Curie", EntityKind::NamedOrPlace, 0.9),
            ],
        };
        let cards = FlashcardGenerator::default().generate_from_analysis(1, &analysis, Utc::now());

        let about = cards
            .iter()
            .filter(|c| c.front == "What do you know about Marie Curie?")
            .count();
        assert_eq!(about, 1);
        assert_eq!(cards.len(), 3);
    }

    #[test]
    fn test_cards_start_fresh_and_due() {
        let now = Utc::now();
        let cards = FlashcardGenerator::default().generate_from_analysis(42, &analysis(), now);
        assert!(!cards.is_empty());
        for card in &cards {
            assert_eq!(card.document_id, 42);
            assert_eq!(card.difficulty, 0);
            assert_eq!(card.review_count, 0);
            assert_eq!(card.correct_count, 0);
            assert_eq!(card.next_review_date, now);
            assert!(card.is_due(now));
        }
    }

    #[test]
    fn test_marker_can_contain_replacement_syntax() {
        let mut config = EngineConfig::default();
        config.flashcards.blank_marker = "$1".to_string();
        let cards = FlashcardGenerator::new(&config).generate_from_analysis(1, &analysis(), Utc::now());
        assert!(cards.iter().any(|c| c.front == "Fill in the blank: $1 is a process"));
    }

    #[test]
    fn test_empty_content_gives_no_cards() {
        assert!(FlashcardGenerator::default().generate(1, "").is_empty());
    }

    #[test]
    fn test_generates_from_raw_text() {
        let text = "Photosynthesis is a process. Plants use photosynthesis to convert light. Light is energy.";
        let cards = FlashcardGenerator::default().generate(1, text);
        assert!(cards.iter().any(|c| c.front == "What is Photosynthesis?"));

        let mut pairs: Vec<(&str, &str)> =
            cards.iter().map(|c| (c.front.as_str(), c.back.as_str())).collect();
        let before = pairs.len();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), before);
    }
}
