//! Data models produced by text analysis

use serde::{Deserialize, Serialize};

/// A salient phrase found in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPhrase {
    pub text: String,
    /// Score in [0, 1]
    pub importance: f32,
}

impl KeyPhrase {
    pub fn new(text: impl Into<String>, importance: f32) -> Self {
        Self {
            text: text.into(),
            importance: importance.clamp(0.0, 1.0),
        }
    }
}

/// Kind of entity recognized by the heuristic extractors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    /// Capitalized name of a person, place or organization
    NamedOrPlace,
    /// Numeric expression, optionally with a unit
    Number,
    /// Technical term or quoted phrase
    Concept,
    Other,
}

impl Default for EntityKind {
    fn default() -> Self {
        Self::Other
    }
}

/// An entity mention with the extractor's confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub text: String,
    #[serde(default)]
    pub kind: EntityKind,
    /// Confidence in [0, 1]
    pub confidence: f32,
}

impl Entity {
    pub fn new(text: impl Into<String>, kind: EntityKind, confidence: f32) -> Self {
        Self {
            text: text.into(),
            kind,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Everything the analyzer extracts from one document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysis {
    pub sentences: Vec<String>,
    pub key_phrases: Vec<KeyPhrase>,
    pub entities: Vec<Entity>,
}

impl TextAnalysis {
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty() && self.key_phrases.is_empty() && self.entities.is_empty()
    }
}
