use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use mindmesh_lib::config::EngineConfig;
use mindmesh_lib::document::Document;
use mindmesh_lib::flashcards::Flashcard;

/// Shared state for CLI commands
pub struct App {
    pub config: EngineConfig,
}

impl App {
    /// Load config from `--config` if given, otherwise from the default
    /// location when it exists
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => EngineConfig::load_or_default().context("Failed to load default config")?,
        };
        Ok(Self { config })
    }

    /// Read a text document, optionally overriding its title
    pub fn load_document(&self, path: &Path, id: i64, title: Option<&str>) -> Result<Document> {
        let mut document = Document::from_text_file(id, path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if let Some(title) = title {
            document.title = title.to_string();
        }
        if document.content.trim().is_empty() {
            log::warn!("{} is empty", path.display());
        }
        Ok(document)
    }

    pub fn load_deck(&self, path: &Path) -> Result<Vec<Flashcard>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read deck {}", path.display()))?;
        let cards: Vec<Flashcard> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse deck {}", path.display()))?;
        Ok(cards)
    }

    pub fn save_deck(&self, path: &Path, cards: &[Flashcard]) -> Result<()> {
        let content = serde_json::to_string_pretty(cards)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write deck {}", path.display()))?;
        Ok(())
    }

    /// Card at a 1-based position in the deck
    pub fn card_index(&self, cards: &[Flashcard], position: usize) -> Result<usize> {
        if position == 0 || position > cards.len() {
            bail!("Card {} not found (deck has {} cards)", position, cards.len());
        }
        Ok(position - 1)
    }
}
