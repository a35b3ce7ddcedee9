//! Cognitive map generation
//!
//! Turns document text into a graph of key concepts: ranked, grouped into
//! topics, laid out on a plane and connected by weighted, labeled edges.

pub mod builder;
pub mod cluster;
pub mod edges;
pub mod layout;
pub mod models;
pub mod ranker;

pub use builder::CognitiveMapBuilder;
pub use models::*;
