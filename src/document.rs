//! Documents and the one-call processing pipeline

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cognitive_map::{CognitiveMap, CognitiveMapBuilder, MapError};
use crate::config::EngineConfig;
use crate::flashcards::{Flashcard, FlashcardGenerator};

/// File extensions read as plain text
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "text"];

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(PathBuf),
}

pub type Result<T> = std::result::Result<T, DocumentError>;

/// Raw text to be analyzed, identified by the caller's document id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub content: String,
}

impl Document {
    pub fn new(id: i64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Read a UTF-8 text or markdown file. The title is the file stem.
    pub fn from_text_file(id: i64, path: &Path) -> Result<Self> {
        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| TEXT_EXTENSIONS.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false);
        if !supported {
            return Err(DocumentError::UnsupportedFile(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());

        log::debug!("Read {} ({} bytes)", path.display(), content.len());
        Ok(Self { id, title, content })
    }
}

/// The map and flashcards derived from one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    pub map: CognitiveMap,
    pub flashcards: Vec<Flashcard>,
}

/// Runs map building and flashcard generation over a shared text analysis
pub struct DocumentProcessor {
    builder: CognitiveMapBuilder,
    generator: FlashcardGenerator,
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl DocumentProcessor {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            builder: CognitiveMapBuilder::new(config),
            generator: FlashcardGenerator::new(config),
        }
    }

    pub fn process(&self, document: &Document) -> std::result::Result<DocumentAnalysis, MapError> {
        self.process_at(document, Utc::now())
    }

    pub fn process_at(
        &self,
        document: &Document,
        now: DateTime<Utc>,
    ) -> std::result::Result<DocumentAnalysis, MapError> {
        let analysis = self.builder.analyzer().analyze(&document.content);
        let map = self.builder.build_from_analysis(
            document.id,
            &document.title,
            &document.content,
            &analysis,
            now,
        )?;
        let flashcards = self
            .generator
            .generate_from_analysis(document.id, &analysis, now);

        log::info!(
            "Processed document {} ({:?}): {} nodes, {} edges, {} flashcards",
            document.id,
            document.title,
            map.nodes().len(),
            map.edges().len(),
            flashcards.len()
        );

        Ok(DocumentAnalysis { map, flashcards })
    }

    /// Process documents independently, stopping at the first failure
    pub fn process_all(
        &self,
        documents: &[Document],
    ) -> std::result::Result<Vec<DocumentAnalysis>, MapError> {
        documents.iter().map(|d| self.process(d)).collect()
    }
}
