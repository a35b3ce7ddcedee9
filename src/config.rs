//! Engine configuration
//!
//! Every limit and weight used by the analysis, map and flashcard stages lives
//! here. Defaults reproduce the documented behavior; a TOML file can override
//! any subset:
//!
//! ```toml
//! [analysis]
//! max_key_phrases = 30
//!
//! [map]
//! edge_threshold = 0.2
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Text analysis limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Sentences must be strictly longer than this many characters
    pub min_sentence_chars: usize,
    pub max_key_phrases: usize,
    /// Single words must score above this to become key phrases
    pub word_score_threshold: f32,
    pub max_entities: usize,
    /// Entities must have confidence strictly above this
    pub min_entity_confidence: f32,
    pub embedding_dimensions: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_sentence_chars: 15,
            max_key_phrases: 25,
            word_score_threshold: 0.01,
            max_entities: 20,
            min_entity_confidence: 0.5,
            embedding_dimensions: 384,
        }
    }
}

/// Cognitive map construction limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub max_concepts: usize,
    pub main_topics: usize,
    pub children_per_topic: usize,
    pub independent_nodes: usize,
    /// Distance from center for topics that have children
    pub topic_radius: f32,
    /// Distance from center for topics without children
    pub leaf_radius: f32,
    /// Distance from the parent for child nodes
    pub child_radius: f32,
    /// Angular gap between siblings, in radians
    pub child_spread: f32,
    pub child_importance_factor: f32,
    pub cooccurrence_weight: f32,
    pub proximity_weight: f32,
    pub semantic_weight: f32,
    /// Edges must score strictly above this
    pub edge_threshold: f32,
    pub max_edges: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            max_concepts: 20,
            main_topics: 5,
            children_per_topic: 4,
            independent_nodes: 5,
            topic_radius: 150.0,
            leaf_radius: 200.0,
            child_radius: 80.0,
            child_spread: 0.5,
            child_importance_factor: 0.8,
            cooccurrence_weight: 0.4,
            proximity_weight: 0.4,
            semantic_weight: 0.2,
            edge_threshold: 0.15,
            max_edges: 30,
        }
    }
}

/// Flashcard generation limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashcardConfig {
    pub definition_cards: usize,
    pub fill_in_sentences: usize,
    pub entity_cards: usize,
    pub blank_marker: String,
}

impl Default for FlashcardConfig {
    fn default() -> Self {
        Self {
            definition_cards: 10,
            fill_in_sentences: 5,
            entity_cards: 5,
            blank_marker: "______".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub analysis: AnalysisConfig,
    pub map: MapConfig,
    pub flashcards: FlashcardConfig,
}

impl EngineConfig {
    /// Default location of the config file
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("mindmesh").join("config.toml"))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Load from the default location, falling back to defaults if the file
    /// does not exist
    pub fn load_or_default() -> Result<Self> {
        let path = match Self::default_path() {
            Ok(p) => p,
            Err(_) => return Ok(Self::default()),
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.analysis.embedding_dimensions == 0 {
            return Err(ConfigError::Invalid(
                "analysis.embedding_dimensions must be positive".to_string(),
            ));
        }

        let unit_fields = [
            ("analysis.word_score_threshold", self.analysis.word_score_threshold),
            ("analysis.min_entity_confidence", self.analysis.min_entity_confidence),
            ("map.child_importance_factor", self.map.child_importance_factor),
            ("map.cooccurrence_weight", self.map.cooccurrence_weight),
            ("map.proximity_weight", self.map.proximity_weight),
            ("map.semantic_weight", self.map.semantic_weight),
            ("map.edge_threshold", self.map.edge_threshold),
        ];
        for (name, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        let weight_sum =
            self.map.cooccurrence_weight + self.map.proximity_weight + self.map.semantic_weight;
        if weight_sum > 1.0 + f32::EPSILON {
            return Err(ConfigError::Invalid(format!(
                "map edge weights must sum to at most 1, got {}",
                weight_sum
            )));
        }

        if self.flashcards.blank_marker.is_empty() {
            return Err(ConfigError::Invalid(
                "flashcards.blank_marker must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis.max_key_phrases, 25);
        assert_eq!(config.map.max_edges, 30);
        assert_eq!(config.analysis.embedding_dimensions, 384);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[map]\nedge_threshold = 0.3\nmax_edges = 10\n").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.map.edge_threshold, 0.3);
        assert_eq!(config.map.max_edges, 10);
        assert_eq!(config.map.main_topics, 5);
        assert_eq!(config.analysis, AnalysisConfig::default());
    }

    #[test]
    fn test_rejects_out_of_range_weight() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[map]\nsemantic_weight = 1.5\n").unwrap();

        let err = EngineConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let mut config = EngineConfig::default();
        config.analysis.embedding_dimensions = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[map\n").unwrap();

        assert!(matches!(EngineConfig::load(&path), Err(ConfigError::Toml(_))));
    }
}
