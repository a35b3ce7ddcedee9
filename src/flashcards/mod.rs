//! Flashcards and spaced repetition
//!
//! This module provides:
//! - Card generation from analyzed document text
//! - The difficulty-based review scheduler
//! - Due-card selection and deck statistics

pub mod algorithm;
pub mod generator;
pub mod models;

pub use algorithm::{deck_stats, due_cards, review};
pub use generator::FlashcardGenerator;
pub use models::*;
