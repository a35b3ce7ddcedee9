//! Text analysis for documents
//!
//! This module provides:
//! - Sentence segmentation
//! - Key phrase extraction (capitalized spans and TF-IDF-like word scoring)
//! - Heuristic entity extraction
//! - Hashed embeddings

pub mod embedding;
pub mod models;
pub mod text;

pub use embedding::{cosine_similarity, embed};
pub use models::*;
pub use text::TextAnalyzer;
