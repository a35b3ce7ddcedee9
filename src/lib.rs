//! Cognitive map and flashcard engine
//!
//! Turns free-form document text into a weighted concept graph and a deck of
//! spaced-repetition flashcards, and reschedules cards as they are reviewed.
//! Every operation is a synchronous function of its inputs.

pub mod analysis;
pub mod cognitive_map;
pub mod config;
pub mod document;
pub mod flashcards;

pub use cognitive_map::{CognitiveMap, CognitiveMapBuilder};
pub use config::EngineConfig;
pub use document::{Document, DocumentAnalysis, DocumentProcessor};
pub use flashcards::{Flashcard, FlashcardGenerator, ReviewOutcome};
